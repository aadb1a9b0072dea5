pub mod auth;
pub mod follows;
pub mod goods;
pub mod health;
pub mod live_registrations;
pub mod lives;
pub mod posts;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                           register (public), list
/// /users/{id}                                      get
///
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/me                                         own profile
/// /auth/auth_update                                get, patch own profile
///
/// /posts                                           list (?user), create
/// /posts/{id}                                      get, delete
///
/// /goods                                           list (?user, ?post), create
/// /goods/{id}                                      get, delete
///
/// /lives                                           list (?user), create
/// /lives/{id}                                      get, delete
///
/// /live_registrations                              list (?user, ?live), create
/// /live_registrations/{id}                         delete
///
/// /follows                                         list (?follower, ?followed), create
/// /follows/{id}                                    delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/goods", goods::router())
        .nest("/lives", lives::router())
        .nest("/live_registrations", live_registrations::router())
        .nest("/follows", follows::router())
}
