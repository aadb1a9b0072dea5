//! Route definitions for the `/follows` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::follows;
use crate::state::AppState;

/// Routes mounted at `/follows`.
///
/// ```text
/// GET    /       -> list_follows
/// POST   /       -> create_follow
/// DELETE /{id}   -> delete_follow
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(follows::list_follows).post(follows::create_follow))
        .route("/{id}", delete(follows::delete_follow))
}
