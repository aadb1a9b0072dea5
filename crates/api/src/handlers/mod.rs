//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `livehub_db` and return
//! [`crate::error::AppResult`]; errors propagate with `?` and are rendered by
//! [`crate::error::AppError`]'s `IntoResponse` impl.

pub mod auth;
pub mod follows;
pub mod goods;
pub mod live_registrations;
pub mod lives;
pub mod posts;
pub mod users;

use std::collections::HashMap;

use livehub_core::types::DbId;
use livehub_db::models::user::UserResponse;
use livehub_db::repositories::UserRepo;
use sqlx::PgPool;

/// Load public profiles for `ids` in a single query, keyed by id.
pub(crate) async fn load_users(
    pool: &PgPool,
    ids: impl IntoIterator<Item = DbId>,
) -> Result<HashMap<DbId, UserResponse>, sqlx::Error> {
    let mut ids: Vec<DbId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let users = UserRepo::find_by_ids(pool, &ids).await?;
    Ok(users
        .iter()
        .map(|u| (u.id, UserResponse::from(u)))
        .collect())
}
