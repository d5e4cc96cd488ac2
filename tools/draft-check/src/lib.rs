//! Check SportSync form drafts stored as JSON files.
//!
//! The binary reads one draft, runs the matching checker from
//! `sportsync-validation` and prints a JSON report of the form
//! `{"valid": false, "errors": [{"field": ..., "message": ...}]}` on
//! standard output. Logs go to standard error.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use mockable::Clock;
use serde::Serialize;
use sportsync_validation::{
    Credentials, DraftError, EventForm, GroundBookingDraft, RegistrationForm, SubEventDraft,
    ValidationError, dto::from_json, validate_booking, validate_sign_in, validate_sign_up,
    validate_sub_event, wall_clock,
};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod settings;

pub use settings::Settings;

/// Kind of draft held in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DraftKind {
    /// An event form with its sub-events.
    Event,
    /// A single sub-event.
    SubEvent,
    /// A registration form: `{"teamBased": bool, "request": {...}}`.
    Registration,
    /// A ground booking.
    Booking,
    /// Sign-in credentials.
    SignIn,
    /// Sign-up credentials.
    SignUp,
}

/// `draft-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "draft-check",
    about = "Validate a SportSync form draft and print a JSON report",
    version
)]
pub struct CliArgs {
    /// Kind of draft held in the file.
    #[arg(long, value_enum)]
    pub kind: DraftKind,
    /// Path to the JSON draft.
    #[arg(value_name = "path")]
    pub path: Utf8PathBuf,
    /// Wall-clock reading to treat as now, for example `2025-06-01T09:00`.
    /// Defaults to the local clock.
    #[arg(long, value_name = "timestamp", value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    wall_clock::parse(raw).map_err(|error| format!("not a wall-clock timestamp: {error}"))
}

/// Outcome printed for a checked draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Whether the draft passed every rule.
    pub valid: bool,
    /// Every reported field error; empty when valid.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl Report {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    fn from_result(result: Result<(), ValidationError>) -> Self {
        Self::from_errors(result.err().into_iter().collect())
    }
}

/// Errors raised while checking a draft file.
#[derive(Debug, Error)]
pub enum DraftCheckError {
    /// The draft path does not name a file.
    #[error("draft path '{path}' has no file name")]
    MissingFileName {
        /// The rejected path.
        path: Utf8PathBuf,
    },
    /// The draft file could not be read.
    #[error("failed to read draft '{path}': {source}")]
    Read {
        /// Path of the draft.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The draft JSON did not decode.
    #[error(transparent)]
    Draft(#[from] DraftError),
    /// The report could not be rendered.
    #[error("failed to render report: {0}")]
    Render(#[source] serde_json::Error),
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Write(#[source] io::Error),
}

/// Read a draft file through a capability-scoped directory handle.
///
/// # Errors
///
/// Returns [`DraftCheckError::MissingFileName`] for paths without a file
/// component and [`DraftCheckError::Read`] when the file cannot be read.
pub fn read_draft(path: &Utf8Path) -> Result<String, DraftCheckError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| DraftCheckError::MissingFileName {
            path: path.to_owned(),
        })?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let read_error = |source| DraftCheckError::Read {
        path: path.to_owned(),
        source,
    };
    let directory =
        Dir::open_ambient_dir(parent.as_std_path(), ambient_authority()).map_err(read_error)?;
    directory.read_to_string(file_name).map_err(read_error)
}

/// Decode `text` as a draft of `kind` and check it.
///
/// `now` is only consulted for bookings.
///
/// # Errors
///
/// Returns [`DraftError`] when the text does not decode as the requested
/// kind.
pub fn check_draft(
    kind: DraftKind,
    text: &str,
    now: NaiveDateTime,
) -> Result<Report, DraftError> {
    let report = match kind {
        DraftKind::Event => Report::from_result(from_json::<EventForm>(text)?.check()),
        DraftKind::SubEvent => {
            Report::from_result(validate_sub_event(&from_json::<SubEventDraft>(text)?))
        }
        DraftKind::Registration => match from_json::<RegistrationForm>(text)?.check() {
            Ok(()) => Report::from_errors(Vec::new()),
            Err(rejection) => Report::from_errors(rejection.field_errors()),
        },
        DraftKind::Booking => {
            let draft: GroundBookingDraft = from_json(text)?;
            Report::from_result(validate_booking(&draft, now))
        }
        DraftKind::SignIn => {
            let credentials: Credentials = from_json(text)?;
            Report::from_result(validate_sign_in(&credentials))
        }
        DraftKind::SignUp => {
            let credentials: Credentials = from_json(text)?;
            Report::from_result(validate_sign_up(&credentials))
        }
    };
    Ok(report)
}

/// Check the draft named by `args` and write its report to `out`.
///
/// # Errors
///
/// Returns a [`DraftCheckError`] when the draft cannot be read or decoded,
/// or the report cannot be written. A draft that fails validation is not an
/// error; it yields a report with `valid: false`.
pub fn run(
    args: &CliArgs,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<Report, DraftCheckError> {
    let now = args.now.unwrap_or_else(|| clock.local().naive_local());
    let text = read_draft(&args.path)?;
    let report = check_draft(args.kind, &text, now)?;
    info!(
        kind = ?args.kind,
        path = %args.path,
        valid = report.valid,
        errors = report.errors.len(),
        "draft checked"
    );
    let rendered = serde_json::to_string_pretty(&report).map_err(DraftCheckError::Render)?;
    writeln!(out, "{rendered}").map_err(DraftCheckError::Write)?;
    Ok(report)
}

/// Install the global tracing subscriber, writing to standard error.
///
/// Falls back to the `info` filter when the configured directive does not
/// parse. A subscriber that is already installed is left in place.
pub fn init_tracing(settings: &Settings) {
    let filter =
        EnvFilter::try_new(settings.log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let installed = if settings.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = installed {
        warn!(error = %error, "tracing init failed");
    }
}
