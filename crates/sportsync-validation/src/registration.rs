//! Registration requests and the eligibility and roster validator.
//!
//! A registration targets one sub-event and is either individual or on
//! behalf of a team. The participation mode must match the sub-event's
//! `teamBased` flag; that gate fails fast. Everything after it accumulates,
//! so a form can highlight every bad roster field in one pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dto::RegistrationRequestDto;
use crate::error::{Field, MemberField, ValidationError};
use crate::rules::{
    MAX_TEAM_MEMBERS, MEMBER_NAME_LENGTH, NAME_LENGTH, coerce_identifier, has_length, is_blank,
    is_email, is_plain_name,
};

/// One entry of a team roster.
///
/// Members exist only inside a team registration and carry no identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member name.
    #[serde(default)]
    pub name: String,
    /// Contact email address.
    #[serde(default)]
    pub email: String,
}

impl TeamMember {
    /// Create a member from a name and an email address.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A team name and its ordered roster.
///
/// The first member is conventionally the captain; nothing else sets it
/// apart. A decoded team may hold any number of members so that oversized
/// rosters can be reported, but [`Team::add_member`] refuses to grow a
/// roster past [`MAX_TEAM_MEMBERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    team_name: String,
    #[serde(default)]
    members: Vec<TeamMember>,
}

impl Team {
    /// Create a team from a name and roster.
    pub fn new(team_name: impl Into<String>, members: Vec<TeamMember>) -> Self {
        Self {
            team_name: team_name.into(),
            members,
        }
    }

    /// The team name as entered.
    #[must_use]
    pub fn team_name(&self) -> &str {
        self.team_name.as_str()
    }

    /// The roster in entry order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Replace the team name.
    pub fn rename(&mut self, team_name: impl Into<String>) {
        self.team_name = team_name.into();
    }

    /// Append a member to the roster.
    ///
    /// # Errors
    ///
    /// Returns a [`Field::Roster`] error when the roster already holds
    /// [`MAX_TEAM_MEMBERS`] members; the roster is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use sportsync_validation::{Team, TeamMember};
    ///
    /// let mut team = Team::new("Eagles", Vec::new());
    /// for n in 0..15 {
    ///     team.add_member(TeamMember::new(format!("Player {n}"), "p@example.com"))
    ///         .expect("room on the roster");
    /// }
    /// let error = team
    ///     .add_member(TeamMember::new("Extra", "x@example.com"))
    ///     .expect_err("roster is full");
    /// assert_eq!(error.message(), "Maximum 15 team members allowed");
    /// assert_eq!(team.members().len(), 15);
    /// ```
    pub fn add_member(&mut self, member: TeamMember) -> Result<(), ValidationError> {
        if self.members.len() >= MAX_TEAM_MEMBERS {
            return Err(roster_full());
        }
        self.members.push(member);
        Ok(())
    }

    /// Remove the member at `index`.
    ///
    /// The last remaining member cannot be removed; `None` is returned in
    /// that case and when `index` is out of range.
    pub fn remove_member(&mut self, index: usize) -> Option<TeamMember> {
        (self.members.len() > 1 && index < self.members.len()).then(|| self.members.remove(index))
    }
}

fn roster_full() -> ValidationError {
    ValidationError::new(
        Field::Roster,
        format!("Maximum {MAX_TEAM_MEMBERS} team members allowed"),
    )
}

/// How the actor takes part in the sub-event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participation {
    /// The actor registers alone.
    Individual,
    /// The actor registers a team.
    Team(Team),
}

/// A candidate registration, prior to submission.
///
/// Identifiers are kept as entered and coerced during validation. The actor
/// identifier is always supplied by the caller; nothing here reads session
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RegistrationRequestDto")]
pub struct RegistrationRequest {
    user_id: String,
    sub_event_id: String,
    participation: Participation,
}

impl RegistrationRequest {
    /// Build a request with an explicit participation mode.
    pub fn new(
        user_id: impl Into<String>,
        sub_event_id: impl Into<String>,
        participation: Participation,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            sub_event_id: sub_event_id.into(),
            participation,
        }
    }

    /// Build an individual registration.
    pub fn individual(user_id: impl Into<String>, sub_event_id: impl Into<String>) -> Self {
        Self::new(user_id, sub_event_id, Participation::Individual)
    }

    /// Build a team registration.
    pub fn team(user_id: impl Into<String>, sub_event_id: impl Into<String>, team: Team) -> Self {
        Self::new(user_id, sub_event_id, Participation::Team(team))
    }

    /// Registering user's identifier as entered.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Target sub-event identifier as entered.
    #[must_use]
    pub fn sub_event_id(&self) -> &str {
        self.sub_event_id.as_str()
    }

    /// Participation mode.
    #[must_use]
    pub const fn participation(&self) -> &Participation {
        &self.participation
    }
}

/// A registration request paired with the target sub-event's mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Whether the target sub-event takes team registrations.
    pub team_based: bool,
    /// The candidate registration.
    pub request: RegistrationRequest,
}

impl RegistrationForm {
    /// Run [`validate_registration`] over this form.
    ///
    /// # Errors
    ///
    /// Returns the mode mismatch or every accumulated field error.
    pub fn check(&self) -> Result<(), RegistrationRejection> {
        validate_registration(self.team_based, &self.request)
    }
}

/// Per-field messages for one roster slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberErrors {
    /// Message for the member name, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message for the member email, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl MemberErrors {
    /// Returns `true` when neither field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Team errors mirroring the submitted team.
///
/// `members` holds one entry per submitted roster slot, in order, whether
/// or not that slot failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterErrors {
    /// Message for the team name, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Message for the roster size, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<String>,
    /// Messages per roster slot.
    pub members: Vec<MemberErrors>,
}

impl RosterErrors {
    /// Returns `true` when no team field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.team_name.is_none()
            && self.roster.is_none()
            && self.members.iter().all(MemberErrors::is_empty)
    }
}

/// Accumulated registration errors mirroring the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationErrors {
    /// Message for the actor identifier, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Message for the sub-event identifier, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_event_id: Option<String>,
    /// Team errors, present for team registrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<RosterErrors>,
}

impl RegistrationErrors {
    /// Returns `true` when nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.sub_event_id.is_none()
            && self.team.as_ref().is_none_or(RosterErrors::is_empty)
    }

    /// Flatten into `{field, message}` records in form order.
    #[must_use]
    pub fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        push(&mut errors, Field::UserId, self.user_id.as_ref());
        push(&mut errors, Field::SubEventId, self.sub_event_id.as_ref());
        if let Some(team) = &self.team {
            push(&mut errors, Field::TeamName, team.team_name.as_ref());
            push(&mut errors, Field::Roster, team.roster.as_ref());
            for (index, member) in team.members.iter().enumerate() {
                let name = Field::Member {
                    index,
                    field: MemberField::Name,
                };
                let email = Field::Member {
                    index,
                    field: MemberField::Email,
                };
                push(&mut errors, name, member.name.as_ref());
                push(&mut errors, email, member.email.as_ref());
            }
        }
        errors
    }
}

fn push(errors: &mut Vec<ValidationError>, field: Field, message: Option<&String>) {
    if let Some(text) = message {
        errors.push(ValidationError::new(field, text.clone()));
    }
}

/// Why a registration was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationRejection {
    /// The participation mode does not match the sub-event.
    #[error("{0}")]
    ModeMismatch(ValidationError),
    /// One or more fields failed; every failure is listed.
    #[error("registration has {} invalid field(s)", .0.field_errors().len())]
    Invalid(RegistrationErrors),
}

impl RegistrationRejection {
    /// Flatten into `{field, message}` records.
    #[must_use]
    pub fn field_errors(&self) -> Vec<ValidationError> {
        match self {
            Self::ModeMismatch(error) => vec![error.clone()],
            Self::Invalid(errors) => errors.field_errors(),
        }
    }
}

/// Validate a registration against the target sub-event's mode.
///
/// The mode gate runs first and fails fast. After it, identifier, team
/// name, roster size and per-member rules are all evaluated and every
/// failure is reported; each individual field reports its first failing
/// rule only.
///
/// # Errors
///
/// Returns [`RegistrationRejection::ModeMismatch`] when the request's
/// participation does not match `team_based`, otherwise
/// [`RegistrationRejection::Invalid`] with every field error.
///
/// # Examples
/// ```
/// use sportsync_validation::{RegistrationRequest, RegistrationRejection, validate_registration};
///
/// let request = RegistrationRequest::individual("7", "12");
/// let rejection = validate_registration(true, &request).expect_err("team-based sub-event");
/// assert!(matches!(rejection, RegistrationRejection::ModeMismatch(_)));
/// assert_eq!(rejection.to_string(), "This is a team-based event");
/// ```
pub fn validate_registration(
    team_based: bool,
    request: &RegistrationRequest,
) -> Result<(), RegistrationRejection> {
    let result = check_mode(team_based, request.participation())
        .map_err(RegistrationRejection::ModeMismatch)
        .and_then(|()| {
            let errors = collect_errors(request);
            if errors.is_empty() {
                Ok(())
            } else {
                Err(RegistrationRejection::Invalid(errors))
            }
        });
    if let Err(rejection) = &result {
        for error in rejection.field_errors() {
            debug!(field = %error.field(), message = error.message(), "registration rejected");
        }
    }
    result
}

fn check_mode(team_based: bool, participation: &Participation) -> Result<(), ValidationError> {
    match (team_based, participation) {
        (true, Participation::Individual) => Err(ValidationError::new(
            Field::Participation,
            "This is a team-based event",
        )),
        (false, Participation::Team(_)) => Err(ValidationError::new(
            Field::Participation,
            "This is not a team-based event",
        )),
        (true, Participation::Team(_)) | (false, Participation::Individual) => Ok(()),
    }
}

fn collect_errors(request: &RegistrationRequest) -> RegistrationErrors {
    RegistrationErrors {
        user_id: coerce_identifier(request.user_id())
            .is_none()
            .then(|| "Invalid user ID".to_owned()),
        sub_event_id: coerce_identifier(request.sub_event_id())
            .is_none()
            .then(|| "Invalid sub-event ID".to_owned()),
        team: match request.participation() {
            Participation::Individual => None,
            Participation::Team(team) => Some(check_team(team)),
        },
    }
}

/// Evaluate every team rule without stopping at the first failure.
///
/// Exposed so a roster editor can refresh inline errors while the user
/// types, independently of the mode gate.
#[must_use]
pub fn check_team(team: &Team) -> RosterErrors {
    RosterErrors {
        team_name: check_team_name(team.team_name()),
        roster: check_roster_size(team.members().len()),
        members: team.members().iter().map(check_member).collect(),
    }
}

fn check_team_name(name: &str) -> Option<String> {
    if is_blank(name) {
        Some("Team name is required".to_owned())
    } else if !is_plain_name(name) {
        Some("Team name must contain only letters, numbers, and spaces".to_owned())
    } else if !has_length(name, &NAME_LENGTH) {
        Some("Team name must be between 3 and 100 characters".to_owned())
    } else {
        None
    }
}

fn check_roster_size(count: usize) -> Option<String> {
    if count == 0 {
        Some("At least one team member is required".to_owned())
    } else if count > MAX_TEAM_MEMBERS {
        Some(roster_full().message().to_owned())
    } else {
        None
    }
}

fn check_member(member: &TeamMember) -> MemberErrors {
    let name = if is_blank(&member.name) {
        Some("Team member name is required")
    } else if !is_plain_name(&member.name) {
        Some("Name must contain only letters, numbers, and spaces")
    } else if !has_length(&member.name, &MEMBER_NAME_LENGTH) {
        Some("Name must be between 2 and 100 characters")
    } else {
        None
    };
    let email = if is_blank(&member.email) {
        Some("Email is required")
    } else if !is_email(&member.email) {
        Some("Invalid email format")
    } else {
        None
    };
    MemberErrors {
        name: name.map(str::to_owned),
        email: email.map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    //! Covers the mode gate, identifier coercion and roster accumulation.

    use rstest::{fixture, rstest};

    use super::*;

    fn alex() -> TeamMember {
        TeamMember::new("Alex", "alex@example.com")
    }

    #[fixture]
    fn eagles() -> Team {
        Team::new("Eagles", vec![alex(), TeamMember::new("Sam", "sam@example.com")])
    }

    fn invalid(result: Result<(), RegistrationRejection>) -> RegistrationErrors {
        match result {
            Err(RegistrationRejection::Invalid(errors)) => errors,
            other => panic!("expected accumulated errors, got {other:?}"),
        }
    }

    #[rstest]
    fn accepts_individual_registration() {
        let request = RegistrationRequest::individual("7", "12");
        assert_eq!(validate_registration(false, &request), Ok(()));
    }

    #[rstest]
    fn accepts_team_registration(eagles: Team) {
        let request = RegistrationRequest::team("7", "12", eagles);
        assert_eq!(validate_registration(true, &request), Ok(()));
    }

    #[rstest]
    fn team_payload_on_individual_sub_event_is_refused(eagles: Team) {
        let request = RegistrationRequest::team("7", "12", eagles);
        let rejection = validate_registration(false, &request).expect_err("mismatch");
        assert_eq!(
            rejection,
            RegistrationRejection::ModeMismatch(ValidationError::new(
                Field::Participation,
                "This is not a team-based event"
            ))
        );
    }

    #[rstest]
    fn mode_gate_runs_before_identifier_checks() {
        let request = RegistrationRequest::individual("abc", "");
        let rejection = validate_registration(true, &request).expect_err("mismatch");
        assert_eq!(rejection.field_errors().len(), 1);
        assert_eq!(rejection.to_string(), "This is a team-based event");
    }

    #[rstest]
    #[case("abc", "12", Some("Invalid user ID"), None)]
    #[case("7", "", None, Some("Invalid sub-event ID"))]
    #[case("0", "x", Some("Invalid user ID"), Some("Invalid sub-event ID"))]
    fn identifiers_must_be_positive_integers(
        #[case] user_id: &str,
        #[case] sub_event_id: &str,
        #[case] user_error: Option<&str>,
        #[case] sub_event_error: Option<&str>,
    ) {
        let request = RegistrationRequest::individual(user_id, sub_event_id);
        let errors = invalid(validate_registration(false, &request));
        assert_eq!(errors.user_id.as_deref(), user_error);
        assert_eq!(errors.sub_event_id.as_deref(), sub_event_error);
        assert!(errors.team.is_none());
    }

    #[rstest]
    fn bad_email_is_reported_on_its_slot_only() {
        let team = Team::new("Eagles", vec![TeamMember::new("Alex", "not-an-email")]);
        let request = RegistrationRequest::team("7", "12", team);
        let errors = invalid(validate_registration(true, &request));
        let roster = errors.team.expect("team errors");
        assert_eq!(roster.team_name, None);
        assert_eq!(
            roster.members,
            vec![MemberErrors {
                name: None,
                email: Some("Invalid email format".to_owned()),
            }]
        );
    }

    #[rstest]
    fn accumulates_errors_across_every_slot() {
        let team = Team::new(
            "Team #1",
            vec![
                TeamMember::new("A", "a@example.com"),
                alex(),
                TeamMember::new("", ""),
            ],
        );
        let request = RegistrationRequest::team("7", "12", team);
        let errors = invalid(validate_registration(true, &request));
        let fields: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|error| format!("{}: {}", error.field(), error.message()))
            .collect();
        assert_eq!(
            fields,
            vec![
                "team.teamName: Team name must contain only letters, numbers, and spaces",
                "team.members[0].name: Name must be between 2 and 100 characters",
                "team.members[2].name: Team member name is required",
                "team.members[2].email: Email is required",
            ]
        );
    }

    #[rstest]
    #[case("", "Team name is required")]
    #[case("Team #1", "Team name must contain only letters, numbers, and spaces")]
    #[case("Ea", "Team name must be between 3 and 100 characters")]
    fn team_name_rules(mut eagles: Team, #[case] name: &str, #[case] expected: &str) {
        eagles.rename(name);
        assert_eq!(check_team(&eagles).team_name.as_deref(), Some(expected));
    }

    #[rstest]
    fn team_name_with_digits_and_spaces_is_accepted(mut eagles: Team) {
        eagles.rename("Team 1");
        assert!(check_team(&eagles).is_empty());
    }

    #[rstest]
    #[case::symbol("Al#x", Some("Name must contain only letters, numbers, and spaces"))]
    #[case::hyphen("Mary-Jo", Some("Name must contain only letters, numbers, and spaces"))]
    #[case::whitespace("   ", Some("Team member name is required"))]
    #[case::digits_and_spaces("Player 7", None)]
    fn member_name_character_rules(#[case] name: &str, #[case] expected: Option<&str>) {
        let team = Team::new("Eagles", vec![TeamMember::new(name, "p@example.com")]);
        let errors = check_team(&team);
        let member = errors.members.first().expect("one member slot");
        assert_eq!(member.name.as_deref(), expected);
        assert_eq!(member.email, None);
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[case(100, true)]
    #[case(101, false)]
    fn member_name_length_bounds(#[case] length: usize, #[case] accepted: bool) {
        let team = Team::new(
            "Eagles",
            vec![TeamMember::new("a".repeat(length), "p@example.com")],
        );
        let errors = check_team(&team);
        let member = errors.members.first().expect("one member slot");
        let expected = (!accepted).then_some("Name must be between 2 and 100 characters");
        assert_eq!(member.name.as_deref(), expected);
    }

    #[rstest]
    #[case(0, Some("At least one team member is required"))]
    #[case(1, None)]
    #[case(15, None)]
    #[case(16, Some("Maximum 15 team members allowed"))]
    fn roster_size_bounds(#[case] count: usize, #[case] expected: Option<&str>) {
        let members = (0..count)
            .map(|n| TeamMember::new(format!("Player {n}"), "p@example.com"))
            .collect();
        let team = Team::new("Eagles", members);
        let errors = check_team(&team);
        assert_eq!(errors.roster.as_deref(), expected);
        assert_eq!(errors.members.len(), count);
    }

    #[rstest]
    fn sixteenth_member_is_refused_on_add() {
        let mut team = Team::new("Eagles", Vec::new());
        for n in 0..MAX_TEAM_MEMBERS {
            assert!(
                team.add_member(TeamMember::new(format!("Player {n}"), "p@example.com"))
                    .is_ok()
            );
        }
        let error = team.add_member(alex()).expect_err("roster full");
        assert_eq!(error.field(), Field::Roster);
        assert_eq!(team.members().len(), MAX_TEAM_MEMBERS);
    }

    #[rstest]
    fn last_member_cannot_be_removed(mut eagles: Team) {
        assert_eq!(eagles.remove_member(5), None);
        assert_eq!(eagles.remove_member(0), Some(alex()));
        assert_eq!(eagles.remove_member(0), None);
        assert_eq!(eagles.members().len(), 1);
    }

    #[rstest]
    fn repeated_validation_is_identical(eagles: Team) {
        let mut team = eagles;
        team.rename("E");
        let request = RegistrationRequest::team("x", "12", team);
        assert_eq!(
            validate_registration(true, &request),
            validate_registration(true, &request)
        );
    }

    #[test]
    fn errors_serialise_as_a_mirror_of_the_request() {
        let team = Team::new("Eagles", vec![alex(), TeamMember::new("Sam", "sam")]);
        let request = RegistrationRequest::team("7", "12", team);
        let errors = invalid(validate_registration(true, &request));
        let json = serde_json::to_value(&errors).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "team": {
                    "members": [{}, { "email": "Invalid email format" }]
                }
            })
        );
    }
}
