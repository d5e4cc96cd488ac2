//! Event drafts and the event-window consistency checker.
//!
//! An event and its sub-events are edited together and submitted as one
//! batch. The checker walks the event's own fields first, then every
//! sub-event's fields, then every sub-event's window against the event's,
//! and stops at the first violation.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::dto::EventDraftDto;
use crate::error::{EventField, Field, SubEventField, ValidationError};
use crate::rules::{DESCRIPTION_LENGTH, NAME_LENGTH, has_length, is_blank, is_plain_name};
use crate::sub_event::{SubEventDraft, validate_sub_event};

/// The parent event as entered in the event form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "EventDraftDto")]
pub struct EventDraft {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Start of the event.
    pub start: Option<NaiveDateTime>,
    /// End of the event.
    pub end: Option<NaiveDateTime>,
}

/// An event together with its ordered sub-events, as submitted by the
/// event form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    /// The parent event.
    pub event: EventDraft,
    /// Sub-events in form order.
    #[serde(default)]
    pub sub_events: Vec<SubEventDraft>,
}

impl EventForm {
    /// Run [`check_event_window`] over this form.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn check(&self) -> Result<(), ValidationError> {
        check_event_window(&self.event, &self.sub_events)
    }
}

/// Validate an event and the nesting of its sub-events, failing fast.
///
/// Rules, in order:
///
/// 1. name, description, start and end present;
/// 2. name uses letters, digits and spaces only;
/// 3. name is 3 to 100 characters;
/// 4. description is 10 to 500 characters;
/// 5. start strictly before end;
/// 6. every sub-event passes [`validate_sub_event`]; failures are prefixed
///    with `Sub-event {n}: ` where `n` is 1-based;
/// 7. every sub-event window lies inside the event window.
///
/// # Errors
///
/// Returns the first violated rule as a [`ValidationError`].
///
/// # Examples
/// ```
/// use sportsync_validation::{EventDraft, check_event_window, wall_clock};
///
/// let event = EventDraft {
///     name: "Summer Cup".to_owned(),
///     description: "A friendly summer tournament".to_owned(),
///     start: Some(wall_clock::parse("2025-06-01T18:00").expect("valid")),
///     end: Some(wall_clock::parse("2025-06-01T10:00").expect("valid")),
/// };
/// let error = check_event_window(&event, &[]).expect_err("inverted window");
/// assert_eq!(error.message(), "End time must be after start time");
/// ```
pub fn check_event_window(
    event: &EventDraft,
    sub_events: &[SubEventDraft],
) -> Result<(), ValidationError> {
    let result = check_event_fields(event).and_then(|(start, end)| {
        check_sub_event_fields(sub_events)?;
        check_nesting(start, end, sub_events)
    });
    if let Err(error) = &result {
        debug!(field = %error.field(), message = error.message(), "event draft rejected");
    }
    result
}

fn check_event_fields(
    event: &EventDraft,
) -> Result<(NaiveDateTime, NaiveDateTime), ValidationError> {
    let (start, end) = match (
        is_blank(&event.name),
        is_blank(&event.description),
        event.start,
        event.end,
    ) {
        (false, false, Some(start), Some(end)) => (start, end),
        (name_blank, description_blank, start, _) => {
            let absent = if name_blank {
                EventField::Name
            } else if description_blank {
                EventField::Description
            } else if start.is_none() {
                EventField::Start
            } else {
                EventField::End
            };
            return Err(ValidationError::new(
                Field::Event(absent),
                "All event fields are required",
            ));
        }
    };

    if !is_plain_name(&event.name) {
        return Err(ValidationError::new(
            Field::Event(EventField::Name),
            "Event name must contain only letters, numbers, and spaces",
        ));
    }
    if !has_length(&event.name, &NAME_LENGTH) {
        return Err(ValidationError::new(
            Field::Event(EventField::Name),
            "Event name must be between 3 and 100 characters",
        ));
    }
    if !has_length(&event.description, &DESCRIPTION_LENGTH) {
        return Err(ValidationError::new(
            Field::Event(EventField::Description),
            "Description must be between 10 and 500 characters",
        ));
    }
    if start >= end {
        return Err(ValidationError::new(
            Field::Event(EventField::End),
            "End time must be after start time",
        ));
    }

    Ok((start, end))
}

fn check_sub_event_fields(sub_events: &[SubEventDraft]) -> Result<(), ValidationError> {
    for (number, sub_event) in (1..).zip(sub_events) {
        validate_sub_event(sub_event).map_err(|error| error.at_sub_event(number))?;
    }
    Ok(())
}

fn check_nesting(
    start: NaiveDateTime,
    end: NaiveDateTime,
    sub_events: &[SubEventDraft],
) -> Result<(), ValidationError> {
    let outside = (1..).zip(sub_events).find(|(_, sub_event)| {
        sub_event
            .window()
            .is_some_and(|(sub_start, sub_end)| sub_start < start || sub_end > end)
    });
    match outside {
        Some((number, _)) => Err(ValidationError::new(
            Field::SubEvent {
                position: Some(number - 1),
                field: SubEventField::Window,
            },
            format!("Sub-event {number} must be within the main event time range"),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    //! Covers rule ordering and window nesting for event drafts.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::wall_clock;

    fn at(raw: &str) -> NaiveDateTime {
        wall_clock::parse(raw).expect("valid fixture timestamp")
    }

    #[fixture]
    fn summer_cup() -> EventDraft {
        EventDraft {
            name: "Summer Cup".to_owned(),
            description: "A friendly summer tournament".to_owned(),
            start: Some(at("2025-06-01T10:00")),
            end: Some(at("2025-06-01T18:00")),
        }
    }

    #[fixture]
    fn final_match() -> SubEventDraft {
        SubEventDraft {
            name: "Final Match".to_owned(),
            team_based: false,
            max_participants: Some(2),
            ground_id: Some(1),
            start: Some(at("2025-06-01T11:00")),
            end: Some(at("2025-06-01T12:00")),
        }
    }

    fn message(result: Result<(), ValidationError>) -> String {
        result
            .expect_err("draft should be rejected")
            .message()
            .to_owned()
    }

    #[rstest]
    fn accepts_summer_cup(summer_cup: EventDraft, final_match: SubEventDraft) {
        assert_eq!(check_event_window(&summer_cup, &[final_match]), Ok(()));
    }

    #[rstest]
    fn accepts_event_without_sub_events(summer_cup: EventDraft) {
        assert_eq!(check_event_window(&summer_cup, &[]), Ok(()));
    }

    fn blank(event: &mut EventDraft, field: EventField) {
        match field {
            EventField::Name => event.name.clear(),
            EventField::Description => event.description = "   ".to_owned(),
            EventField::Start => event.start = None,
            EventField::End => event.end = None,
        }
    }

    #[rstest]
    #[case(EventField::Name, "event.name")]
    #[case(EventField::Description, "event.description")]
    #[case(EventField::Start, "event.start")]
    #[case(EventField::End, "event.end")]
    fn reports_first_absent_field(
        mut summer_cup: EventDraft,
        #[case] field: EventField,
        #[case] expected_field: &str,
    ) {
        blank(&mut summer_cup, field);
        let error = check_event_window(&summer_cup, &[]).expect_err("missing field");
        assert_eq!(error.field().to_string(), expected_field);
        assert_eq!(error.message(), "All event fields are required");
    }

    #[rstest]
    fn absent_fields_are_reported_before_bad_names(mut summer_cup: EventDraft) {
        summer_cup.name = "Cup #1".to_owned();
        blank(&mut summer_cup, EventField::End);
        let error = check_event_window(&summer_cup, &[]).expect_err("missing end");
        assert_eq!(error.field(), Field::Event(EventField::End));
    }

    #[rstest]
    #[case("Summer Cup!", "Event name must contain only letters, numbers, and spaces")]
    #[case("SC", "Event name must be between 3 and 100 characters")]
    fn rejects_bad_event_names(
        mut summer_cup: EventDraft,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        summer_cup.name = name.to_owned();
        assert_eq!(message(check_event_window(&summer_cup, &[])), expected);
    }

    #[rstest]
    #[case(9)]
    #[case(501)]
    fn rejects_description_outside_bounds(mut summer_cup: EventDraft, #[case] length: usize) {
        summer_cup.description = "x".repeat(length);
        assert_eq!(
            message(check_event_window(&summer_cup, &[])),
            "Description must be between 10 and 500 characters"
        );
    }

    #[rstest]
    fn inverted_window_is_reported_before_sub_events(
        mut summer_cup: EventDraft,
        mut final_match: SubEventDraft,
    ) {
        summer_cup.start = Some(at("2025-06-01T18:00"));
        summer_cup.end = Some(at("2025-06-01T10:00"));
        final_match.name = "x".to_owned();
        let error = check_event_window(&summer_cup, &[final_match]).expect_err("inverted");
        assert_eq!(error.field(), Field::Event(EventField::End));
        assert_eq!(error.message(), "End time must be after start time");
    }

    #[rstest]
    fn sub_event_failures_carry_their_position(
        summer_cup: EventDraft,
        final_match: SubEventDraft,
    ) {
        let mut second = final_match.clone();
        second.max_participants = Some(1001);
        let error =
            check_event_window(&summer_cup, &[final_match, second]).expect_err("bad cap");
        assert_eq!(error.field().to_string(), "subEvents[1].maxParticipants");
        assert_eq!(
            error.message(),
            "Sub-event 2: Sub-event must have between 1 and 1000 participants"
        );
    }

    #[rstest]
    #[case::starts_early("2025-06-01T09:00", "2025-06-01T12:00")]
    #[case::ends_late("2025-06-01T17:00", "2025-06-01T18:30")]
    fn rejects_sub_event_outside_window(
        summer_cup: EventDraft,
        mut final_match: SubEventDraft,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        final_match.start = Some(at(start));
        final_match.end = Some(at(end));
        let error = check_event_window(&summer_cup, &[final_match]).expect_err("outside");
        assert_eq!(error.field().to_string(), "subEvents[0].window");
        assert_eq!(
            error.message(),
            "Sub-event 1 must be within the main event time range"
        );
    }

    #[rstest]
    fn window_edges_are_inclusive(summer_cup: EventDraft, mut final_match: SubEventDraft) {
        final_match.start = summer_cup.start;
        final_match.end = summer_cup.end;
        assert_eq!(check_event_window(&summer_cup, &[final_match]), Ok(()));
    }

    #[rstest]
    fn field_rules_run_over_every_sub_event_before_nesting(
        summer_cup: EventDraft,
        final_match: SubEventDraft,
    ) {
        let mut early = final_match.clone();
        early.start = Some(at("2025-06-01T08:00"));
        let mut unnamed = final_match;
        unnamed.name.clear();
        let error = check_event_window(&summer_cup, &[early, unnamed]).expect_err("rejected");
        assert_eq!(
            error.message(),
            "Sub-event 2: All sub-event fields are required"
        );
    }

    #[rstest]
    fn repeated_checks_agree(summer_cup: EventDraft, mut final_match: SubEventDraft) {
        final_match.start = Some(at("2025-06-01T09:00"));
        let sub_events = [final_match];
        let first = check_event_window(&summer_cup, &sub_events);
        let second = check_event_window(&summer_cup, &sub_events);
        assert_eq!(first, second);
    }
}
