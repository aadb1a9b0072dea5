//! Repository for the `follows` table.

use livehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::follow::{CreateFollow, Follow, FollowFilter};
use crate::repositories::page;

const COLUMNS: &str = "id, follower_id, followed_id, created_at, updated_at";

/// Provides create/read/delete operations for follow relations.
pub struct FollowRepo;

impl FollowRepo {
    /// Insert a follow relation.
    ///
    /// Duplicates fail with a unique violation on
    /// [`crate::models::follow::UNIQUE_CONSTRAINT`]; self-follows fail the
    /// `ck_follows_not_self` check.
    pub async fn create(pool: &PgPool, input: &CreateFollow) -> Result<Follow, sqlx::Error> {
        let query = format!(
            "INSERT INTO follows (follower_id, followed_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Follow>(&query)
            .bind(input.follower_id)
            .bind(input.followed_id)
            .fetch_one(pool)
            .await
    }

    /// Find a follow relation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Follow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM follows WHERE id = $1");
        sqlx::query_as::<_, Follow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List follow relations matching every supplied filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: FollowFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Follow>, sqlx::Error> {
        let (limit, offset) = page(limit, offset);
        let query = format!(
            "SELECT {COLUMNS} FROM follows
             WHERE ($1::BIGINT IS NULL OR follower_id = $1)
               AND ($2::BIGINT IS NULL OR followed_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Follow>(&query)
            .bind(filter.follower_id)
            .bind(filter.followed_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a follow relation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM follows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
