//! Good ("like") entity model and DTOs.

use livehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Name of the unique constraint on `(user_id, post_id)`.
pub const UNIQUE_CONSTRAINT: &str = "uq_goods_user_id_post_id";

/// A row from the `goods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Good {
    pub id: DbId,
    pub user_id: DbId,
    pub post_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new good.
#[derive(Debug, Clone, Copy)]
pub struct CreateGood {
    pub user_id: DbId,
    pub post_id: DbId,
}

/// Optional filters for listing goods. Supplied filters are combined with AND.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodFilter {
    pub user_id: Option<DbId>,
    pub post_id: Option<DbId>,
}
