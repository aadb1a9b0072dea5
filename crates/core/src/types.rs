use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Reject a write unless `actor_id` is the user who owns (or would own) the row.
///
/// `message` is returned verbatim to the client, so it should say what the
/// caller attempted (e.g. "Cannot delete another user's good").
pub fn ensure_owner(actor_id: DbId, owner_id: DbId, message: &str) -> Result<(), CoreError> {
    if actor_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Ownership(message.to_string()))
    }
}
