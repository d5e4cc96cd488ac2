//! Ground booking drafts and their checks.
//!
//! The current time is an argument so the rule stays pure; callers supply
//! it from a clock.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::dto::GroundBookingDraftDto;
use crate::error::{BookingField, Field, ValidationError};

/// A ground booking as entered in the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "GroundBookingDraftDto")]
pub struct GroundBookingDraft {
    /// Ground to book.
    pub ground_id: Option<u64>,
    /// Start of the booking.
    pub start: Option<NaiveDateTime>,
    /// End of the booking.
    pub end: Option<NaiveDateTime>,
}

/// Check a booking against the wall clock reading `now`, failing fast.
///
/// # Errors
///
/// Returns the first of: a missing field, `start >= end`, `start < now`.
///
/// # Examples
/// ```
/// use sportsync_validation::{GroundBookingDraft, validate_booking, wall_clock};
///
/// let draft = GroundBookingDraft {
///     ground_id: Some(4),
///     start: Some(wall_clock::parse("2025-06-01T09:00").expect("valid")),
///     end: Some(wall_clock::parse("2025-06-01T11:00").expect("valid")),
/// };
/// let now = wall_clock::parse("2025-06-01T10:00").expect("valid");
/// let error = validate_booking(&draft, now).expect_err("starts in the past");
/// assert_eq!(error.message(), "Cannot book a ground in the past");
/// ```
pub fn validate_booking(
    draft: &GroundBookingDraft,
    now: NaiveDateTime,
) -> Result<(), ValidationError> {
    let result = check_booking(draft, now);
    if let Err(error) = &result {
        debug!(field = %error.field(), message = error.message(), %now, "booking rejected");
    }
    result
}

fn check_booking(draft: &GroundBookingDraft, now: NaiveDateTime) -> Result<(), ValidationError> {
    let (start, end) = match (draft.ground_id, draft.start, draft.end) {
        (Some(_), Some(start), Some(end)) => (start, end),
        (ground_id, start, _) => {
            let absent = if ground_id.is_none() {
                BookingField::GroundId
            } else if start.is_none() {
                BookingField::Start
            } else {
                BookingField::End
            };
            return Err(ValidationError::new(
                Field::Booking(absent),
                "All fields are required",
            ));
        }
    };
    if start >= end {
        return Err(ValidationError::new(
            Field::Booking(BookingField::End),
            "End time must be after start time",
        ));
    }
    if start < now {
        return Err(ValidationError::new(
            Field::Booking(BookingField::Start),
            "Cannot book a ground in the past",
        ));
    }
    Ok(())
}
