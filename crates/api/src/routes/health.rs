//! Liveness check mounted at `/health`, outside the versioned API.
//!
//! Always answers 200 while the process is up; a failing database shows as
//! `"status": "degraded"` with `db_healthy: false` and no latency.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round-trip time of `SELECT 1`, present only when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_latency_ms: Option<u64>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let db_latency_ms = match livehub_db::health_check(&state.pool).await {
        Ok(()) => Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = db_latency_ms.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        db_latency_ms,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
