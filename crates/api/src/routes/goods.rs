//! Route definitions for the `/goods` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::goods;
use crate::state::AppState;

/// Routes mounted at `/goods`.
///
/// ```text
/// GET    /       -> list_goods
/// POST   /       -> create_good
/// GET    /{id}   -> get_good
/// DELETE /{id}   -> delete_good
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(goods::list_goods).post(goods::create_good))
        .route("/{id}", get(goods::get_good).delete(goods::delete_good))
}
