//! Handlers for the `/auth` resource: login, refresh, logout, and the
//! authenticated user's own profile (`/auth/me`, `/auth/auth_update`).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use livehub_core::error::CoreError;
use livehub_core::types::DbId;
use livehub_core::users::{validate_username, MAX_BIO_LENGTH, MAX_DISPLAY_NAME_LENGTH};
use livehub_db::models::session::CreateSession;
use livehub_db::models::user::{ProfileResponse, UpdateUser, User};
use livehub_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::users::map_user_conflict;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PATCH /auth/auth_update`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = MAX_DISPLAY_NAME_LENGTH))]
    pub display_name: Option<String>,
    #[validate(length(max = MAX_BIO_LENGTH))]
    pub bio: Option<String>,
    /// New password; requires `current_password`.
    pub password: Option<String>,
    pub current_password: Option<String>,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProfileResponse,
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_failed_login(&state.pool, user.id).await?;

        if user.failed_login_count + 1 >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, "Account locked after repeated failed logins");
        }

        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let response = create_auth_response(&state, &user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// refresh token is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Own-profile handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/me
/// GET /api/v1/auth/auth_update
///
/// The authenticated user's own profile, including email.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = load_self(&state, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: ProfileResponse::from(&user),
    }))
}

/// PATCH /api/v1/auth/auth_update
///
/// Partially update the authenticated user's profile. A password change
/// must be accompanied by the current password.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    input.validate()?;
    if let Some(username) = &input.username {
        validate_username(username).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let user = load_self(&state, auth.user_id).await?;

    // Check the password change fully before writing anything.
    let new_password_hash = match &input.password {
        Some(new_password) => Some(prepare_password_change(
            &user,
            input.username.as_deref().unwrap_or(&user.username),
            new_password,
            input.current_password.as_deref(),
        )?),
        None => None,
    };

    let update = UpdateUser {
        username: input.username,
        email: input.email,
        display_name: input.display_name,
        bio: input.bio,
    };
    let updated = UserRepo::update(&state.pool, user.id, &update)
        .await
        .map_err(map_user_conflict)?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if let Some(hash) = new_password_hash {
        UserRepo::update_password(&state.pool, updated.id, &hash).await?;
        tracing::info!(user_id = updated.id, "Password changed");
    }

    tracing::info!(user_id = updated.id, "Profile updated");

    Ok(Json(DataResponse {
        data: ProfileResponse::from(&updated),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Load the caller's own row. A valid token for a vanished user is a 401.
async fn load_self(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

/// Verify the current password and vet the new one, returning its hash.
fn prepare_password_change(
    user: &User,
    username: &str,
    new_password: &str,
    current_password: Option<&str>,
) -> AppResult<String> {
    let current = current_password.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "current_password is required to change the password".into(),
        ))
    })?;

    let matches = verify_password(current, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(AppError::Core(CoreError::Validation(
            "current_password is incorrect".into(),
        )));
    }

    validate_password_strength(new_password, username)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    hash_password(new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at: Utc::now()
            + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days),
        user_agent,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_ttl_secs(),
        user: ProfileResponse::from(user),
    })
}
