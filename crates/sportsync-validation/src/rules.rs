//! Shared field predicates used by every checker.
//!
//! The event, sub-event, team and member name fields all share one
//! character class; they differ only in their length bounds. Lengths are
//! counted in characters, not bytes.
//!
//! # Rules
//!
//! - Names: ASCII letters, digits and spaces only
//! - Event, sub-event and team names: 3 to 100 characters
//! - Member names: 2 to 100 characters
//! - Descriptions: 10 to 500 characters
//! - Participant caps: 1 to 1000
//! - Team rosters: 1 to 15 members

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;

/// Allowed length for event, sub-event and team names.
pub const NAME_LENGTH: RangeInclusive<usize> = 3..=100;

/// Allowed length for team member names.
pub const MEMBER_NAME_LENGTH: RangeInclusive<usize> = 2..=100;

/// Allowed length for event descriptions.
///
/// Like every length bound here, this counts Unicode scalar values. A
/// browser's `String.length` counts UTF-16 code units instead, so text
/// outside the Basic Multilingual Plane (most emoji) counts once here and
/// twice in the form: five emoji are 5 characters here but 10 in the form.
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 10..=500;

/// Allowed values for a sub-event's participant cap.
pub const PARTICIPANT_CAP: RangeInclusive<i64> = 1..=1000;

/// Largest roster a team registration may carry.
pub const MAX_TEAM_MEMBERS: usize = 15;

/// Minimum password length for account forms.
pub const PASSWORD_MIN_LENGTH: usize = 6;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9 ]+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` when the text is empty once surrounding whitespace is
/// removed.
///
/// Form fields that only hold whitespace count as not filled in.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Returns `true` if every character is an ASCII letter, digit or space.
///
/// # Examples
///
/// ```
/// use sportsync_validation::rules::is_plain_name;
///
/// assert!(is_plain_name("Team 1"));
/// assert!(!is_plain_name("Team #1"));
/// assert!(!is_plain_name(""));
/// ```
#[must_use]
pub fn is_plain_name(name: &str) -> bool {
    name_regex().is_match(name)
}

/// Returns `true` if the character count of `text` falls inside `bounds`.
#[must_use]
pub fn has_length(text: &str, bounds: &RangeInclusive<usize>) -> bool {
    bounds.contains(&text.chars().count())
}

/// Returns `true` if the address has a `local@domain.tld` shape.
///
/// Each of the three parts must be a non-empty run without whitespace or
/// `@`.
///
/// # Examples
///
/// ```
/// use sportsync_validation::rules::is_email;
///
/// assert!(is_email("alex@example.com"));
/// assert!(!is_email("not-an-email"));
/// assert!(!is_email("alex@example"));
/// ```
#[must_use]
pub fn is_email(address: &str) -> bool {
    email_regex().is_match(address)
}

/// Coerces a raw form identifier into a positive integer.
///
/// Surrounding whitespace is ignored. Zero, negative values and anything
/// that is not an integer yield `None`.
#[must_use]
pub fn coerce_identifier(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|value| *value > 0)
}
