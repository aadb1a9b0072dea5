//! Follow relation rules.

use crate::types::DbId;

/// A user may not follow themselves.
pub fn validate_follow_pair(follower_id: DbId, followed_id: DbId) -> Result<(), String> {
    if follower_id == followed_id {
        return Err("Users cannot follow themselves".to_string());
    }
    Ok(())
}
