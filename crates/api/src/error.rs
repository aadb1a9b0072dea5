use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use livehub_core::error::CoreError;
use livehub_core::filters::IdParseError;
use livehub_core::types::DbId;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{ "error": ..., "code": ..., "details": ... }`, where `details`
/// only appears for errors that point at specific fields.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `livehub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A query filter that is not an integer id.
    #[error(transparent)]
    Parse(#[from] IdParseError),

    /// A query filter naming a row that does not exist.
    #[error("{field} with id {id} not found")]
    FilterNotFound { field: &'static str, id: DbId },

    /// A request body, path or query string that could not be extracted.
    #[error("{message}")]
    Rejected { code: &'static str, message: String },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // The body parsed as JSON but a field had the wrong type or was missing.
        let code = match rejection {
            JsonRejection::JsonDataError(_) => "VALIDATION_ERROR",
            _ => "PARSE_ERROR",
        };
        AppError::Rejected {
            code,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            code: "PARSE_ERROR",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            code: "PARSE_ERROR",
            message: rejection.body_text(),
        }
    }
}

/// Map a unique violation on `constraint` to [`CoreError::Integrity`] over
/// `fields`; any other database error passes through unchanged.
pub fn map_unique_violation(
    err: sqlx::Error,
    constraint: &str,
    fields: &'static [&'static str],
) -> AppError {
    if livehub_db::is_unique_violation(&err, constraint) {
        AppError::Core(CoreError::Integrity { fields })
    } else {
        AppError::Database(err)
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Ownership(msg) => (
                    StatusCode::FORBIDDEN,
                    "OWNERSHIP_VIOLATION",
                    msg.clone(),
                    None,
                ),
                CoreError::Integrity { fields } => (
                    StatusCode::CONFLICT,
                    "INTEGRITY_ERROR",
                    format!(
                        "A record with the same ({}) already exists",
                        fields.join(", ")
                    ),
                    Some(json!({ "fields": fields })),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(err);
                (status, code, message, None)
            }

            // --- Query filter errors ---
            AppError::Parse(err) => (
                StatusCode::BAD_REQUEST,
                "PARSE_ERROR",
                err.to_string(),
                Some(json!({ "field": err.field, "value": err.value })),
            ),
            AppError::FilterNotFound { field, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
                Some(json!({ "field": field, "id": id })),
            ),

            // --- HTTP-specific errors ---
            AppError::Rejected { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let (Some(details), Value::Object(map)) = (details, &mut body) {
            map.insert("details".to_string(), details);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) that a
///   handler did not translate itself map to 409.
/// - Foreign-key violations map to 400: the write named a row that is gone.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            if livehub_db::is_foreign_key_violation(err) {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Referenced record does not exist".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
