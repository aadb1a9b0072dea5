//! Handlers for the `/goods` resource ("likes" of posts).
//!
//! Listing accepts `?user=` and `?post=` filters. Creation must be done by
//! the user named in the body, and deletion only by the good's owner. A
//! second good for the same (user, post) pair is reported as an integrity
//! error naming both fields.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::types::{ensure_owner, DbId, Timestamp};
use livehub_db::models::good::{CreateGood, Good, GoodFilter, UNIQUE_CONSTRAINT};
use livehub_db::models::post::PostDetail;
use livehub_db::models::user::UserResponse;
use livehub_db::repositories::{GoodRepo, PostRepo};
use serde::{Deserialize, Serialize};

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::filters::{post_filter, user_filter};
use crate::handlers::load_users;
use crate::middleware::auth::AuthUser;
use crate::query::GoodListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fields reported when a (user, post) pair is liked twice.
const UNIQUE_FIELDS: &[&str] = &["user", "post"];

const CREATE_FOR_OTHER_USER: &str = "Cannot create a good on behalf of another user";
const DELETE_OTHERS_GOOD: &str = "Cannot delete another user's good";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /goods`.
#[derive(Debug, Deserialize)]
pub struct CreateGoodRequest {
    pub user_id: DbId,
    pub post_id: DbId,
}

/// A good with its user and post expanded.
#[derive(Debug, Serialize)]
pub struct GoodResponse {
    pub id: DbId,
    pub user: UserResponse,
    pub post: PostDetail,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/goods
///
/// `?user=` and `?post=` must be integer ids of existing rows; a
/// non-integer is a `PARSE_ERROR` and an unknown id is `NOT_FOUND`, both
/// naming the field.
pub async fn list_goods(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GoodListParams>,
) -> AppResult<Json<DataResponse<Vec<GoodResponse>>>> {
    let filter = GoodFilter {
        user_id: user_filter(&state.pool, "user", params.user.as_deref()).await?,
        post_id: post_filter(&state.pool, "post", params.post.as_deref()).await?,
    };

    let goods = GoodRepo::list(&state.pool, filter, params.limit, params.offset).await?;
    let data = expand(&state, goods, auth.user_id).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/goods
pub async fn create_good(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGoodRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<GoodResponse>>)> {
    if !PostRepo::exists(&state.pool, input.post_id).await? {
        return Err(missing_post(input.post_id));
    }

    ensure_owner(auth.user_id, input.user_id, CREATE_FOR_OTHER_USER)?;

    let good = GoodRepo::create(
        &state.pool,
        &CreateGood {
            user_id: input.user_id,
            post_id: input.post_id,
        },
    )
    .await
    .map_err(|e| {
        // The post can be deleted between the existence check and the insert.
        if livehub_db::is_foreign_key_violation(&e) {
            missing_post(input.post_id)
        } else {
            map_unique_violation(e, UNIQUE_CONSTRAINT, UNIQUE_FIELDS)
        }
    })?;

    tracing::info!(
        good_id = good.id,
        user_id = auth.user_id,
        post_id = good.post_id,
        "Good created",
    );

    let data = expand_one(&state, good, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/goods/{id}
pub async fn get_good(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<GoodResponse>>> {
    let good = find_good(&state, id).await?;
    let data = expand_one(&state, good, auth.user_id).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/goods/{id}
///
/// Only the user who created the good may delete it.
pub async fn delete_good(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let good = find_good(&state, id).await?;
    ensure_owner(auth.user_id, good.user_id, DELETE_OTHERS_GOOD)?;

    GoodRepo::delete(&state.pool, id).await?;
    tracing::info!(good_id = id, user_id = auth.user_id, "Good deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_good(state: &AppState, id: DbId) -> AppResult<Good> {
    GoodRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Good", id }))
}

async fn expand_one(state: &AppState, good: Good, viewer_id: DbId) -> AppResult<GoodResponse> {
    let id = good.id;
    expand(state, vec![good], viewer_id)
        .await?
        .pop()
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Good", id }))
}

/// Attach users and viewer-annotated posts using one query each.
///
/// A good whose user or post vanished between queries is dropped.
async fn expand(
    state: &AppState,
    goods: Vec<Good>,
    viewer_id: DbId,
) -> AppResult<Vec<GoodResponse>> {
    let users = load_users(&state.pool, goods.iter().map(|g| g.user_id)).await?;

    let mut post_ids: Vec<DbId> = goods.iter().map(|g| g.post_id).collect();
    post_ids.sort_unstable();
    post_ids.dedup();
    let posts: HashMap<DbId, PostDetail> =
        PostRepo::find_details_by_ids(&state.pool, &post_ids, viewer_id)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

    Ok(goods
        .into_iter()
        .filter_map(|g| {
            Some(GoodResponse {
                id: g.id,
                user: users.get(&g.user_id)?.clone(),
                post: posts.get(&g.post_id)?.clone(),
                created_at: g.created_at,
            })
        })
        .collect())
}

fn missing_post(id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!("post_id: Post {id} does not exist")))
}
