//! Scheduling-consistency and registration-eligibility rules for SportSync.
//!
//! Every form that creates or edits events, registers participants, books
//! grounds or manages an account runs its input through this crate before
//! anything is sent to the persistence service. The checkers are pure
//! functions over borrowed drafts: they hold no state and perform no I/O,
//! so equal input always yields equal output.
//!
//! # Overview
//!
//! - [`check_event_window`]: event fields, sub-event fields and window
//!   nesting, failing at the first violation
//! - [`validate_sub_event`]: one sub-event's own fields
//! - [`validate_registration`]: participation mode gate followed by
//!   accumulated identifier and roster errors
//! - [`validate_sign_in`] and [`validate_sign_up`]: account credentials
//! - [`validate_booking`]: ground bookings against an explicit `now`
//! - [`EventSubmission`] and [`ParticipantPayload`]: service request bodies
//!   that can only be built from valid drafts
//!
//! # Example
//!
//! ```
//! use sportsync_validation::{EventForm, dto::from_json};
//!
//! let form: EventForm = from_json(r#"{
//!     "event": {
//!         "name": "Summer Cup",
//!         "description": "A friendly summer tournament",
//!         "start": "2025-06-01T10:00",
//!         "end": "2025-06-01T18:00"
//!     },
//!     "subEvents": [{
//!         "name": "Final Match",
//!         "teamBased": false,
//!         "maxParticipants": 2,
//!         "groundId": 1,
//!         "start": "2025-06-01T09:00",
//!         "end": "2025-06-01T12:00"
//!     }]
//! }"#).expect("valid draft JSON");
//!
//! let error = form.check().expect_err("sub-event starts before the event");
//! assert_eq!(error.field().to_string(), "subEvents[0].window");
//! assert_eq!(error.message(), "Sub-event 1 must be within the main event time range");
//! ```

mod account;
mod booking;
pub mod dto;
mod error;
mod event;
mod payload;
mod registration;
pub mod rules;
mod sub_event;
pub mod wall_clock;

pub use account::{Credentials, validate_sign_in, validate_sign_up};
pub use booking::{GroundBookingDraft, validate_booking};
pub use error::{
    BookingField, DraftError, EventField, Field, MemberField, SubEventField, ValidationError,
};
pub use event::{EventDraft, EventForm, check_event_window};
pub use payload::{EventPayload, EventSubmission, ParticipantPayload, SubEventPayload};
pub use registration::{
    MemberErrors, Participation, RegistrationErrors, RegistrationForm, RegistrationRejection,
    RegistrationRequest, RosterErrors, Team, TeamMember, check_team, validate_registration,
};
pub use sub_event::{SubEventDraft, validate_sub_event};
