//! Sign-in and sign-up credential checks.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Field, ValidationError};
use crate::rules::{PASSWORD_MIN_LENGTH, is_blank, is_email};

/// Credentials entered in the sign-in or sign-up form.
///
/// `confirm_password` is only read by [`validate_sign_up`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account email address.
    #[serde(default)]
    pub email: String,
    /// Account password.
    #[serde(default)]
    pub password: String,
    /// Repeated password on sign-up.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl Credentials {
    /// Credentials for the sign-in form.
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: None,
        }
    }

    /// Credentials for the sign-up form.
    pub fn sign_up(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: Some(confirm_password.into()),
        }
    }
}

/// Check sign-in credentials, failing fast.
///
/// # Errors
///
/// Returns the first of: a missing email or password, a malformed email,
/// a password shorter than six characters.
pub fn validate_sign_in(credentials: &Credentials) -> Result<(), ValidationError> {
    let result = check_sign_in(credentials);
    log_rejection(result.as_ref().err(), "sign-in rejected");
    result
}

/// Check sign-up credentials, failing fast.
///
/// # Errors
///
/// Returns the first of: a missing field, a malformed email, a short
/// password, a confirmation that differs from the password.
///
/// # Examples
/// ```
/// use sportsync_validation::{Credentials, validate_sign_up};
///
/// let credentials = Credentials::sign_up("sam@example.com", "secret1", "secret2");
/// let error = validate_sign_up(&credentials).expect_err("mismatch");
/// assert_eq!(error.field().to_string(), "confirmPassword");
/// assert_eq!(error.message(), "Passwords do not match");
/// ```
pub fn validate_sign_up(credentials: &Credentials) -> Result<(), ValidationError> {
    let result = check_sign_up(credentials);
    log_rejection(result.as_ref().err(), "sign-up rejected");
    result
}

fn log_rejection(error: Option<&ValidationError>, what: &str) {
    if let Some(rejected) = error {
        debug!(field = %rejected.field(), message = rejected.message(), "{what}");
    }
}

fn check_sign_in(credentials: &Credentials) -> Result<(), ValidationError> {
    let missing = if is_blank(&credentials.email) {
        Some(Field::Email)
    } else if credentials.password.is_empty() {
        Some(Field::Password)
    } else {
        None
    };
    if let Some(field) = missing {
        return Err(ValidationError::new(
            field,
            "Email and password are required",
        ));
    }
    check_shape(credentials)
}

fn check_sign_up(credentials: &Credentials) -> Result<(), ValidationError> {
    let confirmation = credentials.confirm_password.as_deref().unwrap_or_default();
    let missing = if is_blank(&credentials.email) {
        Some(Field::Email)
    } else if credentials.password.is_empty() {
        Some(Field::Password)
    } else if confirmation.is_empty() {
        Some(Field::PasswordConfirmation)
    } else {
        None
    };
    if let Some(field) = missing {
        return Err(ValidationError::new(field, "All fields are required"));
    }
    check_shape(credentials)?;
    if credentials.password != confirmation {
        return Err(ValidationError::new(
            Field::PasswordConfirmation,
            "Passwords do not match",
        ));
    }
    Ok(())
}

fn check_shape(credentials: &Credentials) -> Result<(), ValidationError> {
    if !is_email(&credentials.email) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }
    if credentials.password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::new(
            Field::Password,
            format!("Password must be at least {PASSWORD_MIN_LENGTH} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Credentials::sign_in("sam@example.com", "secret1"), None)]
    #[case(Credentials::sign_in("", "secret1"), Some(("email", "Email and password are required")))]
    #[case(Credentials::sign_in("sam@example.com", ""), Some(("password", "Email and password are required")))]
    #[case(Credentials::sign_in("sam@example", "secret1"), Some(("email", "Please enter a valid email address")))]
    #[case(Credentials::sign_in("sam@example.com", "12345"), Some(("password", "Password must be at least 6 characters")))]
    fn sign_in_rules(#[case] credentials: Credentials, #[case] expected: Option<(&str, &str)>) {
        let actual = validate_sign_in(&credentials)
            .err()
            .map(|error| (error.field().to_string(), error.message().to_owned()));
        let wanted = expected.map(|(field, message)| (field.to_owned(), message.to_owned()));
        assert_eq!(actual, wanted);
    }

    #[rstest]
    #[case(Credentials::sign_up("sam@example.com", "secret1", ""), "confirmPassword", "All fields are required")]
    #[case(Credentials::sign_up("sam", "secret1", "secret1"), "email", "Please enter a valid email address")]
    #[case(Credentials::sign_up("sam@example.com", "short", "short"), "password", "Password must be at least 6 characters")]
    #[case(Credentials::sign_up("sam@example.com", "secret1", "secret2"), "confirmPassword", "Passwords do not match")]
    fn sign_up_rules(
        #[case] credentials: Credentials,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let error = validate_sign_up(&credentials).expect_err("rejected");
        assert_eq!(error.field().to_string(), field);
        assert_eq!(error.message(), message);
    }

    #[test]
    fn sign_up_accepts_matching_passwords() {
        let credentials = Credentials::sign_up("sam@example.com", "secret1", "secret1");
        assert_eq!(validate_sign_up(&credentials), Ok(()));
    }

    #[test]
    fn sign_up_requires_a_confirmation() {
        let credentials = Credentials::sign_in("sam@example.com", "secret1");
        let error = validate_sign_up(&credentials).expect_err("no confirmation");
        assert_eq!(error.field(), Field::PasswordConfirmation);
    }
}
