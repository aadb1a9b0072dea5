//! Repository for the `goods` table.

use livehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::good::{CreateGood, Good, GoodFilter};
use crate::repositories::page;

const COLUMNS: &str = "id, user_id, post_id, created_at, updated_at";

/// Provides create/read/delete operations for goods (likes).
pub struct GoodRepo;

impl GoodRepo {
    /// Insert a new good.
    ///
    /// A second good for the same `(user_id, post_id)` fails with a unique
    /// violation on [`crate::models::good::UNIQUE_CONSTRAINT`].
    pub async fn create(pool: &PgPool, input: &CreateGood) -> Result<Good, sqlx::Error> {
        let query = format!(
            "INSERT INTO goods (user_id, post_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Good>(&query)
            .bind(input.user_id)
            .bind(input.post_id)
            .fetch_one(pool)
            .await
    }

    /// Find a good by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Good>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goods WHERE id = $1");
        sqlx::query_as::<_, Good>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List goods matching every supplied filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: GoodFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Good>, sqlx::Error> {
        let (limit, offset) = page(limit, offset);
        let query = format!(
            "SELECT {COLUMNS} FROM goods
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR post_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Good>(&query)
            .bind(filter.user_id)
            .bind(filter.post_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a good. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
