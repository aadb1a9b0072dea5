//! Handlers for the `/lives` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::lives::{
    validate_live_title, MAX_LIVE_DESCRIPTION_LENGTH, MAX_LIVE_PLACE_LENGTH,
};
use livehub_core::types::{ensure_owner, DbId, Timestamp};
use livehub_db::models::live::{CreateLive, LiveDetail, LiveFilter};
use livehub_db::repositories::LiveRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::filters::user_filter;
use crate::middleware::auth::AuthUser;
use crate::query::UserScopedListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /lives`. The organizer is always the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLiveRequest {
    pub title: String,
    #[validate(length(max = MAX_LIVE_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
    #[validate(length(max = MAX_LIVE_PLACE_LENGTH))]
    pub place: Option<String>,
    pub starts_at: Timestamp,
}

/// GET /api/v1/lives
///
/// List lives by start time, optionally only those organized by `?user=`.
pub async fn list_lives(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UserScopedListParams>,
) -> AppResult<Json<DataResponse<Vec<LiveDetail>>>> {
    let filter = LiveFilter {
        user_id: user_filter(&state.pool, "user", params.user.as_deref()).await?,
    };

    let lives = LiveRepo::list_details(
        &state.pool,
        filter,
        auth.user_id,
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: lives }))
}

/// POST /api/v1/lives
pub async fn create_live(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLiveRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LiveDetail>>)> {
    input.validate()?;
    validate_live_title(&input.title).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let live = LiveRepo::create(
        &state.pool,
        &CreateLive {
            user_id: auth.user_id,
            title: input.title,
            description: input.description.unwrap_or_default(),
            place: input.place.unwrap_or_default(),
            starts_at: input.starts_at,
        },
    )
    .await?;

    tracing::info!(live_id = live.id, user_id = auth.user_id, "Live created");

    let detail = find_detail(&state, live.id, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/lives/{id}
pub async fn get_live(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<LiveDetail>>> {
    let detail = find_detail(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/lives/{id}
///
/// Only the organizer may delete a live; its registrations go with it.
pub async fn delete_live(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let live = LiveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Live", id }))?;

    ensure_owner(auth.user_id, live.user_id, "Cannot delete another user's live")?;

    LiveRepo::delete(&state.pool, id).await?;
    tracing::info!(live_id = id, user_id = auth.user_id, "Live deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_detail(state: &AppState, id: DbId, viewer_id: DbId) -> AppResult<LiveDetail> {
    LiveRepo::find_detail(&state.pool, id, viewer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Live", id }))
}
