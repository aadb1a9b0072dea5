//! Repository for the `posts` table.

use livehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostDetail, PostFilter};
use crate::repositories::page;

const COLUMNS: &str = "id, user_id, content, created_at, updated_at";

/// Viewer-annotated projection. `$1` is always the viewer's user id.
const DETAIL_SELECT: &str = "\
    SELECT p.id, p.user_id, p.content, \
           (SELECT COUNT(*) FROM goods g WHERE g.post_id = p.id) AS good_count, \
           EXISTS (SELECT 1 FROM goods g WHERE g.post_id = p.id AND g.user_id = $1) AS is_good, \
           p.created_at, p.updated_at \
    FROM posts p";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, content)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(input.user_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a post with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Find a post annotated for `viewer_id`.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
        viewer_id: DbId,
    ) -> Result<Option<PostDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $2");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch annotated posts for every id in `ids`. Missing ids are skipped.
    pub async fn find_details_by_ids(
        pool: &PgPool,
        ids: &[DbId],
        viewer_id: DbId,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{DETAIL_SELECT} WHERE p.id = ANY($2)");
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(viewer_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List annotated posts, newest first.
    pub async fn list_details(
        pool: &PgPool,
        filter: PostFilter,
        viewer_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PostDetail>, sqlx::Error> {
        let (limit, offset) = page(limit, offset);
        let query = format!(
            "{DETAIL_SELECT}
             WHERE ($2::BIGINT IS NULL OR p.user_id = $2)
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, PostDetail>(&query)
            .bind(viewer_id)
            .bind(filter.user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete a post (its goods cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
