//! Post entity model and DTOs.

use livehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A post annotated for a particular viewer.
///
/// `good_count` is the number of likes; `is_good` is whether the viewer is
/// one of them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub good_count: i64,
    pub is_good: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new post.
#[derive(Debug)]
pub struct CreatePost {
    pub user_id: DbId,
    pub content: String,
}

/// Optional filters for listing posts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostFilter {
    pub user_id: Option<DbId>,
}
