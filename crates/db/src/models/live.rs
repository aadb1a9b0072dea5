//! Live event entity model and DTOs.

use livehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lives` table. `user_id` is the organizer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Live {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub starts_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A live annotated with registration data for a particular viewer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LiveDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub starts_at: Timestamp,
    pub registration_count: i64,
    pub is_registered: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new live.
#[derive(Debug)]
pub struct CreateLive {
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub place: String,
    pub starts_at: Timestamp,
}

/// Optional filters for listing lives.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveFilter {
    pub user_id: Option<DbId>,
}
