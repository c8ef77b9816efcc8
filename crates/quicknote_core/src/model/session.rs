//! Session state and sign-in form models.
//!
//! # Invariants
//! - Forms only check that every field is non-empty. Whitespace counts as
//!   input, except around an email address.
//! - No credential is ever stored or compared.

use crate::model::route::Route;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown after a signup form is accepted.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful!";

/// Whole-app session state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl SessionState {
    pub fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Form validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Required field left empty.
    MissingField(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
        }
    }
}

impl Error for FormError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("email", self.email.trim())?;
        require("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profession: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require("name", &self.name)?;
        require("email", self.email.trim())?;
        require("password", &self.password)?;
        require("profession", &self.profession)
    }
}

/// Result of an accepted signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    /// Confirmation shown to the user.
    pub message: &'static str,
    /// Where the app goes next.
    pub next: Route,
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FormError, LoginForm, SignupForm};

    #[test]
    fn login_form_accepts_any_non_empty_values() {
        assert!(LoginForm::new("not-an-email", "x").validate().is_ok());
    }

    #[test]
    fn login_form_reports_first_missing_field() {
        let err = LoginForm::new("  ", "").validate().unwrap_err();
        assert_eq!(err, FormError::MissingField("email"));
        let err = LoginForm::new("a@b.c", "").validate().unwrap_err();
        assert_eq!(err, FormError::MissingField("password"));
    }

    #[test]
    fn whitespace_password_counts_as_input() {
        assert!(LoginForm::new("a@b.c", "   ").validate().is_ok());
    }

    #[test]
    fn blank_email_is_missing() {
        let err = LoginForm::new(" \t", "pw").validate().unwrap_err();
        assert_eq!(err, FormError::MissingField("email"));
    }

    #[test]
    fn signup_form_accepts_whitespace_text_fields() {
        let form = SignupForm {
            name: " ".to_string(),
            email: "ada@example.com".to_string(),
            password: "  ".to_string(),
            profession: " ".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn signup_form_requires_profession() {
        let form = SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            profession: String::new(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingField("profession")
        );
    }
}
