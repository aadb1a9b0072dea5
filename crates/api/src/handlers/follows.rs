//! Handlers for the `/follows` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::follows::validate_follow_pair;
use livehub_core::types::{ensure_owner, DbId, Timestamp};
use livehub_db::models::follow::{CreateFollow, Follow, FollowFilter, UNIQUE_CONSTRAINT};
use livehub_db::models::user::UserResponse;
use livehub_db::repositories::{FollowRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::filters::user_filter;
use crate::handlers::load_users;
use crate::middleware::auth::AuthUser;
use crate::query::FollowListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const UNIQUE_FIELDS: &[&str] = &["follower", "followed"];

/// Request body for `POST /follows`.
#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    pub follower_id: DbId,
    pub followed_id: DbId,
}

/// A follow relation with both users expanded.
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub id: DbId,
    pub follower: UserResponse,
    pub followed: UserResponse,
    pub created_at: Timestamp,
}

/// GET /api/v1/follows
///
/// `?follower=` lists who a user follows; `?followed=` lists their followers.
pub async fn list_follows(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<FollowListParams>,
) -> AppResult<Json<DataResponse<Vec<FollowResponse>>>> {
    let filter = FollowFilter {
        follower_id: user_filter(&state.pool, "follower", params.follower.as_deref()).await?,
        followed_id: user_filter(&state.pool, "followed", params.followed.as_deref()).await?,
    };

    let follows = FollowRepo::list(&state.pool, filter, params.limit, params.offset).await?;
    let data = expand(&state, follows).await?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/follows
pub async fn create_follow(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFollowRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<FollowResponse>>)> {
    if !UserRepo::exists(&state.pool, input.followed_id).await? {
        return Err(missing_followed(input.followed_id));
    }

    ensure_owner(
        auth.user_id,
        input.follower_id,
        "Cannot follow on behalf of another user",
    )?;
    validate_follow_pair(input.follower_id, input.followed_id)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let follow = FollowRepo::create(
        &state.pool,
        &CreateFollow {
            follower_id: input.follower_id,
            followed_id: input.followed_id,
        },
    )
    .await
    .map_err(|e| {
        // The followed user can be deleted between the existence check and the insert.
        if livehub_db::is_foreign_key_violation(&e) {
            missing_followed(input.followed_id)
        } else {
            map_unique_violation(e, UNIQUE_CONSTRAINT, UNIQUE_FIELDS)
        }
    })?;

    tracing::info!(
        follow_id = follow.id,
        follower_id = follow.follower_id,
        followed_id = follow.followed_id,
        "Follow created",
    );

    let id = follow.id;
    let data = expand(&state, vec![follow])
        .await?
        .pop()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Follow",
            id,
        }))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// DELETE /api/v1/follows/{id}
///
/// Unfollow. Only the follower may remove the relation.
pub async fn delete_follow(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let follow = FollowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Follow",
            id,
        }))?;

    ensure_owner(auth.user_id, follow.follower_id, "Cannot delete another user's follow")?;

    FollowRepo::delete(&state.pool, id).await?;
    tracing::info!(follow_id = id, user_id = auth.user_id, "Follow deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn expand(state: &AppState, follows: Vec<Follow>) -> AppResult<Vec<FollowResponse>> {
    let users = load_users(
        &state.pool,
        follows
            .iter()
            .flat_map(|f| [f.follower_id, f.followed_id]),
    )
    .await?;

    Ok(follows
        .into_iter()
        .filter_map(|f| {
            Some(FollowResponse {
                id: f.id,
                follower: users.get(&f.follower_id)?.clone(),
                followed: users.get(&f.followed_id)?.clone(),
                created_at: f.created_at,
            })
        })
        .collect())
}

fn missing_followed(id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!("followed_id: User {id} does not exist")))
}
