//! Sub-event drafts and their field rules.
//!
//! A sub-event is checked on its own here; nesting inside the parent event
//! window is the event checker's concern.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::dto::SubEventDraftDto;
use crate::error::{Field, SubEventField, ValidationError};
use crate::rules::{NAME_LENGTH, PARTICIPANT_CAP, has_length, is_blank, is_plain_name};

/// A sub-event as entered in the event form.
///
/// Absent values stay `None` so the checker can report them; a participant
/// cap that was not an integer is also carried as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SubEventDraftDto")]
pub struct SubEventDraft {
    /// Display name.
    pub name: String,
    /// Whether registrations are made by teams.
    pub team_based: bool,
    /// Maximum number of participants.
    pub max_participants: Option<i64>,
    /// Ground the sub-event takes place on.
    pub ground_id: Option<u64>,
    /// Start of the sub-event.
    pub start: Option<NaiveDateTime>,
    /// End of the sub-event.
    pub end: Option<NaiveDateTime>,
}

impl SubEventDraft {
    /// Start and end, when both are present.
    #[must_use]
    pub fn window(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

const fn field(field: SubEventField) -> Field {
    Field::SubEvent {
        position: None,
        field,
    }
}

/// Check one sub-event's own fields, stopping at the first failure.
///
/// Rules, in order: name, ground, start and end present; name character
/// class; name length; participant cap within 1 to 1000; start strictly
/// before end.
///
/// # Errors
///
/// Returns the first violated rule as a [`ValidationError`] rooted at
/// `subEvent.<field>`.
///
/// # Examples
/// ```
/// use sportsync_validation::{SubEventDraft, validate_sub_event, wall_clock};
///
/// let draft = SubEventDraft {
///     name: "Final Match".to_owned(),
///     team_based: false,
///     max_participants: Some(0),
///     ground_id: Some(1),
///     start: Some(wall_clock::parse("2025-06-01T11:00").expect("valid")),
///     end: Some(wall_clock::parse("2025-06-01T12:00").expect("valid")),
/// };
/// let error = validate_sub_event(&draft).expect_err("cap of zero");
/// assert_eq!(error.message(), "Sub-event must have between 1 and 1000 participants");
/// ```
pub fn validate_sub_event(draft: &SubEventDraft) -> Result<(), ValidationError> {
    let result = check_fields(draft);
    if let Err(error) = &result {
        debug!(field = %error.field(), message = error.message(), "sub-event draft rejected");
    }
    result
}

fn check_fields(draft: &SubEventDraft) -> Result<(), ValidationError> {
    let missing = if is_blank(&draft.name) {
        Some(SubEventField::Name)
    } else if draft.ground_id.is_none() {
        Some(SubEventField::GroundId)
    } else if draft.start.is_none() {
        Some(SubEventField::Start)
    } else if draft.end.is_none() {
        Some(SubEventField::End)
    } else {
        None
    };
    if let Some(absent) = missing {
        return Err(ValidationError::new(
            field(absent),
            "All sub-event fields are required",
        ));
    }

    if !is_plain_name(&draft.name) {
        return Err(ValidationError::new(
            field(SubEventField::Name),
            "Sub-event name must contain only letters, numbers, and spaces",
        ));
    }
    if !has_length(&draft.name, &NAME_LENGTH) {
        return Err(ValidationError::new(
            field(SubEventField::Name),
            "Sub-event name must be between 3 and 100 characters",
        ));
    }

    if !draft
        .max_participants
        .is_some_and(|cap| PARTICIPANT_CAP.contains(&cap))
    {
        return Err(ValidationError::new(
            field(SubEventField::MaxParticipants),
            "Sub-event must have between 1 and 1000 participants",
        ));
    }

    if draft.window().is_some_and(|(start, end)| start >= end) {
        return Err(ValidationError::new(
            field(SubEventField::End),
            "End time must be after start time",
        ));
    }

    Ok(())
}
