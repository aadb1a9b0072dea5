//! Handlers for the `/posts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::posts::validate_post_content;
use livehub_core::types::{ensure_owner, DbId};
use livehub_db::models::post::{CreatePost, PostDetail, PostFilter};
use livehub_db::repositories::PostRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::filters::user_filter;
use crate::middleware::auth::AuthUser;
use crate::query::UserScopedListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /posts`. The author is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// GET /api/v1/posts
///
/// List posts newest first, optionally only those by `?user=`.
pub async fn list_posts(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserScopedListParams>,
) -> AppResult<Json<DataResponse<Vec<PostDetail>>>> {
    let filter = PostFilter {
        user_id: user_filter(&state.pool, "user", params.user.as_deref()).await?,
    };

    let posts = PostRepo::list_details(
        &state.pool,
        filter,
        auth.user_id,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PostDetail>>)> {
    validate_post_content(&input.content)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let post = PostRepo::create(
        &state.pool,
        &CreatePost {
            user_id: auth.user_id,
            content: input.content,
        },
    )
    .await?;

    tracing::info!(post_id = post.id, user_id = auth.user_id, "Post created");

    let detail = find_detail(&state, post.id, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<PostDetail>>> {
    let detail = find_detail(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/posts/{id}
///
/// Only the author may delete a post. Its goods go with it.
pub async fn delete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    ensure_owner(auth.user_id, post.user_id, "Cannot delete another user's post")?;

    PostRepo::delete(&state.pool, id).await?;
    tracing::info!(post_id = id, user_id = auth.user_id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_detail(state: &AppState, id: DbId, viewer_id: DbId) -> AppResult<PostDetail> {
    PostRepo::find_detail(&state.pool, id, viewer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}
