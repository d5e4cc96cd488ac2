//! Timezone-naive wall-clock timestamps.
//!
//! Forms hand over `datetime-local` values such as `2025-06-01T10:00`; the
//! persistence service expects `2025-06-01T10:00:00`. Both are local wall
//! clock readings with no offset, so they map onto [`NaiveDateTime`].

use chrono::{NaiveDateTime, ParseError};

/// Format the persistence service expects.
pub const SERVICE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const FALLBACK_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a form timestamp.
///
/// Accepts minute or second precision, separated by `T` or a space.
///
/// # Errors
///
/// Returns the error for the service format when no accepted format
/// matches.
///
/// # Examples
/// ```
/// use sportsync_validation::wall_clock::parse;
///
/// let minutes = parse("2025-06-01T10:00").expect("minute precision");
/// let seconds = parse("2025-06-01 10:00:00").expect("second precision");
/// assert_eq!(minutes, seconds);
/// ```
pub fn parse(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let trimmed = raw.trim();
    let precise = NaiveDateTime::parse_from_str(trimmed, SERVICE_FORMAT);
    if precise.is_ok() {
        return precise;
    }
    FALLBACK_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map_or(precise, Ok)
}

/// Parse an optional form timestamp, treating blank input as absent.
///
/// # Errors
///
/// Returns the parse error when non-blank input is not a timestamp.
pub fn parse_optional(raw: Option<&str>) -> Result<Option<NaiveDateTime>, ParseError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(parse)
        .transpose()
}

/// Render a timestamp in the persistence service's format.
///
/// # Examples
/// ```
/// use sportsync_validation::wall_clock::{format_for_service, parse};
///
/// let start = parse("2025-06-01T10:00").expect("valid");
/// assert_eq!(format_for_service(start), "2025-06-01T10:00:00");
/// ```
#[must_use]
pub fn format_for_service(timestamp: NaiveDateTime) -> String {
    timestamp.format(SERVICE_FORMAT).to_string()
}
