use crate::types::DbId;

/// Domain-level failures, independent of the transport that reports them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The acting user tried to create or remove a row owned by someone else.
    #[error("Ownership violation: {0}")]
    Ownership(String),

    /// A uniqueness rule spanning `fields` rejected the write.
    #[error("Integrity violation on ({})", fields.join(", "))]
    Integrity { fields: &'static [&'static str] },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
