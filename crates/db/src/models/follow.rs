//! Follow relation model and DTOs.

use livehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Name of the unique constraint on `(follower_id, followed_id)`.
pub const UNIQUE_CONSTRAINT: &str = "uq_follows_follower_id_followed_id";

/// A row from the `follows` table: `follower_id` follows `followed_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Follow {
    pub id: DbId,
    pub follower_id: DbId,
    pub followed_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a follow relation.
#[derive(Debug, Clone, Copy)]
pub struct CreateFollow {
    pub follower_id: DbId,
    pub followed_id: DbId,
}

/// Optional filters for listing follows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FollowFilter {
    pub follower_id: Option<DbId>,
    pub followed_id: Option<DbId>,
}
