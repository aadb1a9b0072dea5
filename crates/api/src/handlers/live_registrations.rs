//! Handlers for the `/live_registrations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::types::{ensure_owner, DbId};
use livehub_db::models::live_registration::{
    CreateLiveRegistration, LiveRegistration, LiveRegistrationFilter, UNIQUE_CONSTRAINT,
};
use livehub_db::repositories::{LiveRegistrationRepo, LiveRepo};
use serde::Deserialize;

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::filters::{live_filter, user_filter};
use crate::middleware::auth::AuthUser;
use crate::query::LiveRegistrationListParams;
use crate::response::DataResponse;
use crate::state::AppState;

const UNIQUE_FIELDS: &[&str] = &["user", "live"];

/// Request body for `POST /live_registrations`.
#[derive(Debug, Deserialize)]
pub struct CreateLiveRegistrationRequest {
    pub user_id: DbId,
    pub live_id: DbId,
}

/// GET /api/v1/live_registrations
pub async fn list_registrations(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LiveRegistrationListParams>,
) -> AppResult<Json<DataResponse<Vec<LiveRegistration>>>> {
    let filter = LiveRegistrationFilter {
        user_id: user_filter(&state.pool, "user", params.user.as_deref()).await?,
        live_id: live_filter(&state.pool, "live", params.live.as_deref()).await?,
    };

    let registrations =
        LiveRegistrationRepo::list(&state.pool, filter, params.limit, params.offset).await?;

    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// POST /api/v1/live_registrations
///
/// Register the caller for a live. Registering twice for the same live is an
/// integrity error on (user, live).
pub async fn create_registration(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLiveRegistrationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LiveRegistration>>)> {
    if !LiveRepo::exists(&state.pool, input.live_id).await? {
        return Err(missing_live(input.live_id));
    }

    ensure_owner(
        auth.user_id,
        input.user_id,
        "Cannot register another user for a live",
    )?;

    let registration = LiveRegistrationRepo::create(
        &state.pool,
        &CreateLiveRegistration {
            user_id: input.user_id,
            live_id: input.live_id,
        },
    )
    .await
    .map_err(|e| {
        // The live can be deleted between the existence check and the insert.
        if livehub_db::is_foreign_key_violation(&e) {
            missing_live(input.live_id)
        } else {
            map_unique_violation(e, UNIQUE_CONSTRAINT, UNIQUE_FIELDS)
        }
    })?;

    tracing::info!(
        registration_id = registration.id,
        user_id = auth.user_id,
        live_id = registration.live_id,
        "Live registration created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: registration,
        }),
    ))
}

/// DELETE /api/v1/live_registrations/{id}
///
/// Cancel a registration. Only the registered user may do so.
pub async fn delete_registration(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let registration = LiveRegistrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LiveRegistration",
            id,
        }))?;

    ensure_owner(
        auth.user_id,
        registration.user_id,
        "Cannot cancel another user's live registration",
    )?;

    LiveRegistrationRepo::delete(&state.pool, id).await?;
    tracing::info!(registration_id = id, user_id = auth.user_id, "Live registration deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn missing_live(id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!("live_id: Live {id} does not exist")))
}
