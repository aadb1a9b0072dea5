//! Handlers for the `/users` resource: registration and public profiles.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use livehub_core::error::CoreError;
use livehub_core::types::DbId;
use livehub_core::users::{validate_username, MAX_BIO_LENGTH, MAX_DISPLAY_NAME_LENGTH};
use livehub_db::models::user::{
    CreateUser, ProfileResponse, UserResponse, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT,
};
use livehub_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{map_unique_violation, AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = MAX_DISPLAY_NAME_LENGTH))]
    pub display_name: Option<String>,
    #[validate(length(max = MAX_BIO_LENGTH))]
    pub bio: Option<String>,
}

/// POST /api/v1/users
///
/// Public registration. Returns the new user's own profile with 201 Created.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProfileResponse>>)> {
    input.validate()?;
    validate_username(&input.username).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_password_strength(&input.password, &input.username)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        display_name: input.display_name.unwrap_or_default(),
        bio: input.bio.unwrap_or_default(),
    };

    let user = UserRepo::create(&state.pool, &create_dto)
        .await
        .map_err(map_user_conflict)?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProfileResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/users
///
/// List public profiles of active users.
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/{id}
///
/// Deactivated users are reported as not found, matching the listing.
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// Translate a username/email uniqueness violation into an integrity error
/// naming the clashing field.
pub(crate) fn map_user_conflict(err: sqlx::Error) -> AppError {
    if livehub_db::is_unique_violation(&err, USERNAME_CONSTRAINT) {
        map_unique_violation(err, USERNAME_CONSTRAINT, &["username"])
    } else {
        map_unique_violation(err, EMAIL_CONSTRAINT, &["email"])
    }
}
