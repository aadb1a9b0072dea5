//! Parsing of optional integer-id query filters (`?user=3&post=7`).
//!
//! List endpoints receive filters as raw strings so a bad value can be
//! reported with the field name and the offending input instead of a
//! generic extractor rejection.

use crate::types::DbId;

/// A query filter value that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for '{field}': '{value}' is not an integer id")]
pub struct IdParseError {
    pub field: &'static str,
    pub value: String,
}

/// Parse an optional id filter.
///
/// `None` means the filter was not supplied. Surrounding whitespace and a
/// leading `+` are accepted; anything else that is not a base-10 `i64` is an
/// [`IdParseError`] naming `field`.
pub fn parse_id_filter(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DbId>, IdParseError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    raw.trim()
        .parse::<DbId>()
        .map(Some)
        .map_err(|_| IdParseError {
            field,
            value: raw.to_string(),
        })
}
