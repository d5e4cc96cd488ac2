//! Error types shared by the checkers.
//!
//! User-correctable input defects are reported as [`ValidationError`]
//! values carrying the offending [`Field`] and a human-readable message.
//! Malformed caller input shapes are integration bugs rather than user
//! mistakes; they surface as [`DraftError`] while decoding.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Fields of an event draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    /// Event name.
    Name,
    /// Event description.
    Description,
    /// Event start time.
    Start,
    /// Event end time.
    End,
}

impl EventField {
    const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Fields of a sub-event draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubEventField {
    /// Sub-event name.
    Name,
    /// Referenced ground.
    GroundId,
    /// Participant cap.
    MaxParticipants,
    /// Sub-event start time.
    Start,
    /// Sub-event end time.
    End,
    /// The sub-event window as a whole, relative to its parent event.
    Window,
}

impl SubEventField {
    const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::GroundId => "groundId",
            Self::MaxParticipants => "maxParticipants",
            Self::Start => "start",
            Self::End => "end",
            Self::Window => "window",
        }
    }
}

/// Fields of a team member slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberField {
    /// Member name.
    Name,
    /// Member email address.
    Email,
}

impl MemberField {
    const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }
}

/// Fields of a ground booking draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    /// Ground to book.
    GroundId,
    /// Booking start time.
    Start,
    /// Booking end time.
    End,
}

impl BookingField {
    const fn key(self) -> &'static str {
        match self {
            Self::GroundId => "groundId",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Reference to the form field a [`ValidationError`] concerns.
///
/// The [`fmt::Display`] form is the stable identifier callers use to attach
/// messages to inputs, for example `subEvents[0].maxParticipants` or
/// `team.members[2].email`. Positions are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// A field of the parent event.
    Event(EventField),
    /// A field of a sub-event, optionally at a position within its event.
    SubEvent {
        /// Zero-based position in the event's sub-event list, if known.
        position: Option<usize>,
        /// The sub-event field.
        field: SubEventField,
    },
    /// The registering user's identifier.
    UserId,
    /// The target sub-event identifier of a registration.
    SubEventId,
    /// The registration's participation mode.
    Participation,
    /// The team name of a team registration.
    TeamName,
    /// The team roster as a whole.
    Roster,
    /// A field of one roster slot.
    Member {
        /// Zero-based roster slot.
        index: usize,
        /// The member field.
        field: MemberField,
    },
    /// Account email address.
    Email,
    /// Account password.
    Password,
    /// Account password confirmation.
    PasswordConfirmation,
    /// A field of a ground booking.
    Booking(BookingField),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(field) => write!(f, "event.{}", field.key()),
            Self::SubEvent {
                position: Some(position),
                field,
            } => write!(f, "subEvents[{position}].{}", field.key()),
            Self::SubEvent {
                position: None,
                field,
            } => write!(f, "subEvent.{}", field.key()),
            Self::UserId => f.write_str("userId"),
            Self::SubEventId => f.write_str("subEventId"),
            Self::Participation => f.write_str("participation"),
            Self::TeamName => f.write_str("team.teamName"),
            Self::Roster => f.write_str("team.members"),
            Self::Member { index, field } => {
                write!(f, "team.members[{index}].{}", field.key())
            }
            Self::Email => f.write_str("email"),
            Self::Password => f.write_str("password"),
            Self::PasswordConfirmation => f.write_str("confirmPassword"),
            Self::Booking(field) => write!(f, "booking.{}", field.key()),
        }
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A user-correctable input defect.
///
/// ## Invariants
/// - `message` is a complete sentence suitable for display next to `field`.
///
/// # Examples
/// ```
/// use sportsync_validation::{EventField, Field, ValidationError};
///
/// let error = ValidationError::new(Field::Event(EventField::End), "End time must be after start time");
/// assert_eq!(error.field().to_string(), "event.end");
/// assert_eq!(error.to_string(), "End time must be after start time");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    field: Field,
    message: String,
}

impl ValidationError {
    /// Create an error for `field`.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The field the message belongs to.
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Re-root a standalone sub-event error under its 1-based `number`
    /// within an event.
    ///
    /// The message gains a `Sub-event {number}: ` prefix so it remains
    /// meaningful when shown in a form-wide banner.
    #[must_use]
    pub(crate) fn at_sub_event(self, number: usize) -> Self {
        let field = match self.field {
            Field::SubEvent { field, .. } => Field::SubEvent {
                position: Some(number.saturating_sub(1)),
                field,
            },
            other => other,
        };
        Self {
            field,
            message: format!("Sub-event {number}: {}", self.message),
        }
    }
}

/// Errors raised while decoding caller input shapes.
///
/// These indicate an integration defect in the caller rather than a user
/// mistake, so they are never folded into a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The JSON document did not match the expected shape.
    #[error("invalid draft JSON: {message}")]
    Malformed {
        /// Description of the decode failure.
        message: String,
    },

    /// A timestamp was present but not a wall-clock date and time.
    #[error("{field} is not a wall-clock timestamp: '{value}'")]
    InvalidTimestamp {
        /// Field holding the value.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A value had a JSON type the form never produces.
    #[error("{field} has an unsupported JSON type: {found}")]
    UnsupportedType {
        /// Field holding the value.
        field: &'static str,
        /// JSON type that was found.
        found: &'static str,
    },
}
