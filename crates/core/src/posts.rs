//! Post content rules.

/// Maximum length of a post body in characters.
pub const MAX_POST_CONTENT_LENGTH: usize = 1_000;

/// Validate post content: must contain non-whitespace text and stay within
/// [`MAX_POST_CONTENT_LENGTH`] characters.
pub fn validate_post_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Post content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_POST_CONTENT_LENGTH {
        return Err(format!(
            "Post content exceeds maximum length of {MAX_POST_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}
