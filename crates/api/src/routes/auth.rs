//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /login        -> login
/// POST  /refresh      -> refresh
/// POST  /logout       -> logout (requires auth)
/// GET   /me           -> me
/// GET   /auth_update  -> me
/// PATCH /auth_update  -> update_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/auth_update", get(auth::me).patch(auth::update_me))
}
