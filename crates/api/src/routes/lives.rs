//! Route definitions for the `/lives` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lives;
use crate::state::AppState;

/// Routes mounted at `/lives`.
///
/// ```text
/// GET    /       -> list_lives
/// POST   /       -> create_live
/// GET    /{id}   -> get_live
/// DELETE /{id}   -> delete_live
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lives::list_lives).post(lives::create_live))
        .route("/{id}", get(lives::get_live).delete(lives::delete_live))
}
