//! Wire shapes for drafts arriving as JSON.
//!
//! Form values are loosely typed: identifiers and caps may arrive as JSON
//! numbers or numeric strings, timestamps as `datetime-local` text, and
//! cleared inputs as empty strings. These DTOs accept that looseness and
//! convert into the strongly typed drafts, raising [`DraftError`] only for
//! shapes a form never produces.

use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::booking::GroundBookingDraft;
use crate::error::DraftError;
use crate::event::EventDraft;
use crate::registration::{Participation, RegistrationRequest, Team};
use crate::rules::coerce_identifier;
use crate::sub_event::SubEventDraft;
use crate::wall_clock;

/// Decode a draft from JSON text.
///
/// # Errors
///
/// Returns [`DraftError::Malformed`] when the text is not JSON of the
/// expected shape. Conversion failures are reported with their own message
/// inside the malformed error.
///
/// # Examples
/// ```
/// use sportsync_validation::{EventForm, dto::from_json};
///
/// let form: EventForm = from_json(r#"{
///     "event": {
///         "name": "Summer Cup",
///         "description": "A friendly summer tournament",
///         "startTime": "2025-06-01T10:00",
///         "endTime": "2025-06-01T18:00"
///     },
///     "subEvents": []
/// }"#).expect("decodes");
/// assert!(form.check().is_ok());
/// ```
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, DraftError> {
    serde_json::from_str(text).map_err(|error| DraftError::Malformed {
        message: error.to_string(),
    })
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn timestamp(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<chrono::NaiveDateTime>, DraftError> {
    wall_clock::parse_optional(raw).map_err(|_| DraftError::InvalidTimestamp {
        field,
        value: raw.unwrap_or_default().to_owned(),
    })
}

/// Read a JSON number as an integer.
///
/// Whole-valued floats such as `2.0` or `1e3` count as integers. A float's
/// `Display` form never uses an exponent, so parsing it rejects fractions
/// and out-of-range values without a lossy cast.
fn whole<T: FromStr>(number: &Number) -> Option<T> {
    if number.is_f64() {
        number.as_f64().and_then(|value| value.to_string().parse().ok())
    } else {
        number.to_string().parse().ok()
    }
}

/// Read a participant cap. Text that is not an integer becomes `None` so
/// the participant rule can report it.
fn integer(field: &'static str, value: Option<Value>) -> Result<Option<i64>, DraftError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(whole(&number)),
        Some(Value::String(text)) => Ok(text.trim().parse().ok()),
        Some(other) => Err(DraftError::UnsupportedType {
            field,
            found: json_type(&other),
        }),
    }
}

fn identifier(field: &'static str, value: Option<Value>) -> Result<Option<u64>, DraftError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(whole(&number).filter(|id: &u64| *id > 0)),
        Some(Value::String(text)) => Ok(coerce_identifier(&text)),
        Some(other) => Err(DraftError::UnsupportedType {
            field,
            found: json_type(&other),
        }),
    }
}

/// Keep an identifier as entered; coercion happens during validation.
fn identifier_text(field: &'static str, value: Option<Value>) -> Result<String, DraftError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Number(number)) => {
            Ok(whole::<i64>(&number).map_or_else(|| number.to_string(), |id| id.to_string()))
        }
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(DraftError::UnsupportedType {
            field,
            found: json_type(&other),
        }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventDraftDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "startTime")]
    start: Option<String>,
    #[serde(default, alias = "endTime")]
    end: Option<String>,
}

impl TryFrom<EventDraftDto> for EventDraft {
    type Error = DraftError;

    fn try_from(dto: EventDraftDto) -> Result<Self, Self::Error> {
        Ok(Self {
            start: timestamp("event.start", dto.start.as_deref())?,
            end: timestamp("event.end", dto.end.as_deref())?,
            name: dto.name.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubEventDraftDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    team_based: bool,
    #[serde(default)]
    max_participants: Option<Value>,
    #[serde(default)]
    ground_id: Option<Value>,
    #[serde(default, alias = "startTime")]
    start: Option<String>,
    #[serde(default, alias = "endTime")]
    end: Option<String>,
}

impl TryFrom<SubEventDraftDto> for SubEventDraft {
    type Error = DraftError;

    fn try_from(dto: SubEventDraftDto) -> Result<Self, Self::Error> {
        Ok(Self {
            max_participants: integer("subEvent.maxParticipants", dto.max_participants)?,
            ground_id: identifier("subEvent.groundId", dto.ground_id)?,
            start: timestamp("subEvent.start", dto.start.as_deref())?,
            end: timestamp("subEvent.end", dto.end.as_deref())?,
            name: dto.name.unwrap_or_default(),
            team_based: dto.team_based,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistrationRequestDto {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    sub_event_id: Option<Value>,
    #[serde(default)]
    team: Option<Team>,
}

impl TryFrom<RegistrationRequestDto> for RegistrationRequest {
    type Error = DraftError;

    fn try_from(dto: RegistrationRequestDto) -> Result<Self, Self::Error> {
        let participation = dto.team.map_or(Participation::Individual, Participation::Team);
        Ok(Self::new(
            identifier_text("userId", dto.user_id)?,
            identifier_text("subEventId", dto.sub_event_id)?,
            participation,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundBookingDraftDto {
    #[serde(default)]
    ground_id: Option<Value>,
    #[serde(default, alias = "startTime")]
    start: Option<String>,
    #[serde(default, alias = "endTime")]
    end: Option<String>,
}

impl TryFrom<GroundBookingDraftDto> for GroundBookingDraft {
    type Error = DraftError;

    fn try_from(dto: GroundBookingDraftDto) -> Result<Self, Self::Error> {
        Ok(Self {
            ground_id: identifier("booking.groundId", dto.ground_id)?,
            start: timestamp("booking.start", dto.start.as_deref())?,
            end: timestamp("booking.end", dto.end.as_deref())?,
        })
    }
}
