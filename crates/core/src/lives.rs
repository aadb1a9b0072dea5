//! Live event constants and validation.

/// Maximum live title length in characters.
pub const MAX_LIVE_TITLE_LENGTH: usize = 200;

/// Maximum live venue length in characters.
pub const MAX_LIVE_PLACE_LENGTH: u64 = 200;

/// Maximum live description length in characters.
pub const MAX_LIVE_DESCRIPTION_LENGTH: u64 = 5_000;

/// Validate a live title: non-blank and within [`MAX_LIVE_TITLE_LENGTH`].
pub fn validate_live_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Live title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_LIVE_TITLE_LENGTH {
        return Err(format!(
            "Live title exceeds maximum length of {MAX_LIVE_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}
