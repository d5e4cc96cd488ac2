//! Request bodies for the persistence service.
//!
//! Payloads can only be built from drafts that pass their checker, so a
//! payload value always describes a consistent submission.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{EventField, Field, SubEventField, ValidationError};
use crate::event::{EventDraft, EventForm};
use crate::registration::{
    Participation, RegistrationErrors, RegistrationRejection, RegistrationRequest, TeamMember,
    validate_registration,
};
use crate::rules::coerce_identifier;
use crate::sub_event::SubEventDraft;
use crate::wall_clock::format_for_service;

/// Event body in the service's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Start, formatted as `%Y-%m-%dT%H:%M:%S`.
    pub start_time: String,
    /// End, formatted as `%Y-%m-%dT%H:%M:%S`.
    pub end_time: String,
}

/// Sub-event body in the service's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubEventPayload {
    /// Display name.
    pub name: String,
    /// Whether registrations are made by teams.
    pub team_based: bool,
    /// Participant cap.
    pub max_participants: i64,
    /// Ground identifier.
    pub ground_id: u64,
    /// Start, formatted as `%Y-%m-%dT%H:%M:%S`.
    pub start_time: String,
    /// End, formatted as `%Y-%m-%dT%H:%M:%S`.
    pub end_time: String,
}

/// An event and its sub-events, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubmission {
    /// Event body.
    pub event: EventPayload,
    /// Sub-event bodies in form order.
    pub sub_events: Vec<SubEventPayload>,
}

impl TryFrom<&EventForm> for EventSubmission {
    type Error = ValidationError;

    /// Validate the form and build the submission.
    fn try_from(form: &EventForm) -> Result<Self, Self::Error> {
        form.check()?;
        Ok(Self {
            event: event_payload(&form.event)?,
            sub_events: form
                .sub_events
                .iter()
                .map(sub_event_payload)
                .collect::<Result<_, _>>()?,
        })
    }
}

fn present<T>(value: Option<T>, field: Field, message: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, message))
}

fn service_time(
    value: Option<NaiveDateTime>,
    field: Field,
    message: &str,
) -> Result<String, ValidationError> {
    present(value, field, message).map(format_for_service)
}

fn event_payload(event: &EventDraft) -> Result<EventPayload, ValidationError> {
    const REQUIRED: &str = "All event fields are required";
    Ok(EventPayload {
        name: event.name.trim().to_owned(),
        description: event.description.trim().to_owned(),
        start_time: service_time(event.start, Field::Event(EventField::Start), REQUIRED)?,
        end_time: service_time(event.end, Field::Event(EventField::End), REQUIRED)?,
    })
}

fn sub_event_payload(draft: &SubEventDraft) -> Result<SubEventPayload, ValidationError> {
    const REQUIRED: &str = "All sub-event fields are required";
    let field = |sub_field| Field::SubEvent {
        position: None,
        field: sub_field,
    };
    Ok(SubEventPayload {
        name: draft.name.trim().to_owned(),
        team_based: draft.team_based,
        max_participants: present(
            draft.max_participants,
            field(SubEventField::MaxParticipants),
            "Sub-event must have between 1 and 1000 participants",
        )?,
        ground_id: present(draft.ground_id, field(SubEventField::GroundId), REQUIRED)?,
        start_time: service_time(draft.start, field(SubEventField::Start), REQUIRED)?,
        end_time: service_time(draft.end, field(SubEventField::End), REQUIRED)?,
    })
}

/// Registration body in the service's shape.
///
/// Individual registrations serialise `teamName` and `teamMembers` as
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPayload {
    /// Registering user.
    pub user_id: u64,
    /// Target sub-event.
    pub sub_event_id: u64,
    /// Team name for team registrations.
    pub team_name: Option<String>,
    /// Roster for team registrations.
    pub team_members: Option<Vec<TeamMember>>,
}

impl ParticipantPayload {
    /// Validate `request` against the sub-event mode and build its body.
    ///
    /// # Errors
    ///
    /// Returns the rejection from [`validate_registration`].
    ///
    /// # Examples
    /// ```
    /// use sportsync_validation::{ParticipantPayload, RegistrationRequest};
    ///
    /// let request = RegistrationRequest::individual("7", "12");
    /// let payload = ParticipantPayload::from_request(false, &request).expect("valid");
    /// let json = serde_json::to_value(&payload).expect("serialise");
    /// assert_eq!(json["teamName"], serde_json::Value::Null);
    /// assert_eq!(json["subEventId"], 12);
    /// ```
    pub fn from_request(
        team_based: bool,
        request: &RegistrationRequest,
    ) -> Result<Self, RegistrationRejection> {
        validate_registration(team_based, request)?;
        let ids = coerce_identifier(request.user_id()).zip(coerce_identifier(request.sub_event_id()));
        let Some((user_id, sub_event_id)) = ids else {
            return Err(RegistrationRejection::Invalid(RegistrationErrors {
                user_id: Some("Invalid user ID".to_owned()),
                sub_event_id: Some("Invalid sub-event ID".to_owned()),
                team: None,
            }));
        };
        let (team_name, team_members) = match request.participation() {
            Participation::Individual => (None, None),
            Participation::Team(team) => (
                Some(team.team_name().trim().to_owned()),
                Some(team.members().to_vec()),
            ),
        };
        Ok(Self {
            user_id,
            sub_event_id,
            team_name,
            team_members,
        })
    }
}
