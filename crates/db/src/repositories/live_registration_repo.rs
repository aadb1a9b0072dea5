//! Repository for the `live_registrations` table.

use livehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::live_registration::{
    CreateLiveRegistration, LiveRegistration, LiveRegistrationFilter,
};
use crate::repositories::page;

const COLUMNS: &str = "id, user_id, live_id, created_at, updated_at";

pub struct LiveRegistrationRepo;

impl LiveRegistrationRepo {
    /// Register a user for a live.
    ///
    /// Registering the same pair twice fails with a unique violation on
    /// [`crate::models::live_registration::UNIQUE_CONSTRAINT`].
    pub async fn create(
        pool: &PgPool,
        input: &CreateLiveRegistration,
    ) -> Result<LiveRegistration, sqlx::Error> {
        let query = format!(
            "INSERT INTO live_registrations (user_id, live_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveRegistration>(&query)
            .bind(input.user_id)
            .bind(input.live_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LiveRegistration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM live_registrations WHERE id = $1");
        sqlx::query_as::<_, LiveRegistration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List registrations matching every supplied filter, oldest first.
    pub async fn list(
        pool: &PgPool,
        filter: LiveRegistrationFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<LiveRegistration>, sqlx::Error> {
        let (limit, offset) = page(limit, offset);
        let query = format!(
            "SELECT {COLUMNS} FROM live_registrations
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR live_id = $2)
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, LiveRegistration>(&query)
            .bind(filter.user_id)
            .bind(filter.live_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM live_registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
