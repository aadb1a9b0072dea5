//! Resolution of id query filters against the database.
//!
//! A filter is first parsed (non-integer -> `PARSE_ERROR`), then checked for
//! existence (unknown id -> `NOT_FOUND` naming the field). An absent filter
//! resolves to `None` and matches everything.

use livehub_core::filters::parse_id_filter;
use livehub_core::types::DbId;
use livehub_db::repositories::{LiveRepo, PostRepo, UserRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Resolve a filter that must name an existing user.
pub async fn user_filter(
    pool: &PgPool,
    field: &'static str,
    raw: Option<&str>,
) -> AppResult<Option<DbId>> {
    let Some(id) = parse_id_filter(field, raw)? else {
        return Ok(None);
    };
    if !UserRepo::exists(pool, id).await? {
        return Err(AppError::FilterNotFound { field, id });
    }
    Ok(Some(id))
}

/// Resolve a filter that must name an existing post.
pub async fn post_filter(
    pool: &PgPool,
    field: &'static str,
    raw: Option<&str>,
) -> AppResult<Option<DbId>> {
    let Some(id) = parse_id_filter(field, raw)? else {
        return Ok(None);
    };
    if !PostRepo::exists(pool, id).await? {
        return Err(AppError::FilterNotFound { field, id });
    }
    Ok(Some(id))
}

/// Resolve a filter that must name an existing live.
pub async fn live_filter(
    pool: &PgPool,
    field: &'static str,
    raw: Option<&str>,
) -> AppResult<Option<DbId>> {
    let Some(id) = parse_id_filter(field, raw)? else {
        return Ok(None);
    };
    if !LiveRepo::exists(pool, id).await? {
        return Err(AppError::FilterNotFound { field, id });
    }
    Ok(Some(id))
}
