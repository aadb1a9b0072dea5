//! Repository for the `lives` table.

use livehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::live::{CreateLive, Live, LiveDetail, LiveFilter};
use crate::repositories::page;

const COLUMNS: &str = "id, user_id, title, description, place, starts_at, created_at, updated_at";

/// Viewer-annotated projection. `$1` is always the viewer's user id.
const DETAIL_SELECT: &str = "\
    SELECT l.id, l.user_id, l.title, l.description, l.place, l.starts_at, \
           (SELECT COUNT(*) FROM live_registrations r WHERE r.live_id = l.id) AS registration_count, \
           EXISTS (SELECT 1 FROM live_registrations r \
                   WHERE r.live_id = l.id AND r.user_id = $1) AS is_registered, \
           l.created_at, l.updated_at \
    FROM lives l";

/// Provides CRUD operations for lives.
pub struct LiveRepo;

impl LiveRepo {
    /// Insert a new live, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLive) -> Result<Live, sqlx::Error> {
        let query = format!(
            "INSERT INTO lives (user_id, title, description, place, starts_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Live>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.place)
            .bind(input.starts_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Live>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lives WHERE id = $1");
        sqlx::query_as::<_, Live>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a live with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM lives WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Find a live annotated for `viewer_id`.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        viewer_id: DbId,
    ) -> Result<Option<LiveDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE l.id = $2");
        sqlx::query_as::<_, LiveDetail>(&query)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List annotated lives ordered by start time.
    pub async fn list_details(
        pool: &PgPool,
        filter: LiveFilter,
        viewer_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<LiveDetail>, sqlx::Error> {
        let (limit, offset) = page(limit, offset);
        let query = format!(
            "{DETAIL_SELECT}
             WHERE ($2::BIGINT IS NULL OR l.user_id = $2)
             ORDER BY l.starts_at, l.id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, LiveDetail>(&query)
            .bind(viewer_id)
            .bind(filter.user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a live (its registrations cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
