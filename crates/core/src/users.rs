//! User account constants and validation.

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum display name length in characters.
pub const MAX_DISPLAY_NAME_LENGTH: u64 = 100;

/// Maximum profile bio length in characters.
pub const MAX_BIO_LENGTH: u64 = 500;

/// Minimum password length enforced on registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Punctuation allowed in usernames besides letters and digits.
const USERNAME_SYMBOLS: &[char] = &['.', '@', '+', '-', '_'];

/// Validate a username: non-empty, at most [`MAX_USERNAME_LENGTH`] characters,
/// made only of letters, digits and `. @ + - _`.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username exceeds maximum length of {MAX_USERNAME_LENGTH} characters"
        ));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !c.is_alphanumeric() && !USERNAME_SYMBOLS.contains(c))
    {
        return Err(format!(
            "Username contains invalid character '{bad}'. Only letters, digits and . @ + - _ are allowed"
        ));
    }
    Ok(())
}
