//! Route definitions for the `/live_registrations` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::live_registrations;
use crate::state::AppState;

/// Routes mounted at `/live_registrations`.
///
/// ```text
/// GET    /       -> list_registrations
/// POST   /       -> create_registration
/// DELETE /{id}   -> delete_registration
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(live_registrations::list_registrations)
                .post(live_registrations::create_registration),
        )
        .route("/{id}", delete(live_registrations::delete_registration))
}
