//! Live registration model and DTOs.

use livehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Name of the unique constraint on `(user_id, live_id)`.
pub const UNIQUE_CONSTRAINT: &str = "uq_live_registrations_user_id_live_id";

/// A row from the `live_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LiveRegistration {
    pub id: DbId,
    pub user_id: DbId,
    pub live_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user for a live.
#[derive(Debug, Clone, Copy)]
pub struct CreateLiveRegistration {
    pub user_id: DbId,
    pub live_id: DbId,
}

/// Optional filters for listing registrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveRegistrationFilter {
    pub user_id: Option<DbId>,
    pub live_id: Option<DbId>,
}
