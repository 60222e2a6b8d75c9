//! The sign-up form.
//!
//! Four fields, all fail-fast and validated on blur:
//!
//! | Field | Kind | Rules |
//! |---|---|---|
//! | `username` | text | required (blank counts as empty) |
//! | `email` | email | e-mail pattern, required |
//! | `password` | secret | required, minimum length |
//! | `confirm` | secret | required, minimum length, equals `password` |
//!
//! `confirm` depends on `password`, so once the user has left `confirm`
//! holding a value, every change to `password` re-runs the `confirm` chain.

use portico_core::{PorticoError, PorticoResult, SETTINGS};

use crate::fields::{FieldKind, FieldSpec, FieldValue, Secret, Trigger};
use crate::form::FormSpec;
use crate::rules::Rule;
use crate::validation::CleanedValues;

/// Form name, also used as the HTML form id.
pub const FORM_NAME: &str = "sign-up";
/// The personal-name field.
pub const USERNAME: &str = "username";
/// The e-mail field.
pub const EMAIL: &str = "email";
/// The password field.
pub const PASSWORD: &str = "password";
/// The password confirmation field.
pub const CONFIRM: &str = "confirm";

/// Builds the sign-up form with the configured minimum password length.
pub fn signup_form() -> PorticoResult<FormSpec> {
    signup_form_with_min_length(SETTINGS.get_or_default().password_min_length)
}

/// Builds the sign-up form with an explicit minimum password length.
pub fn signup_form_with_min_length(min_length: usize) -> PorticoResult<FormSpec> {
    FormSpec::new(
        FORM_NAME,
        vec![
            FieldSpec::new(USERNAME, FieldKind::Text)
                .label("Personal Name")
                .aria_label("sign-up-username")
                .rule(Rule::required_non_blank("Please input your name!"))
                .validate_first(true)
                .validate_trigger(Trigger::Blur),
            FieldSpec::new(EMAIL, FieldKind::Email)
                .label("E-mail")
                .aria_label("sign-up-email")
                .rule(Rule::email("The input is not valid E-mail!"))
                .rule(Rule::required("Please input your E-mail!"))
                .validate_first(true)
                .validate_trigger(Trigger::Blur),
            FieldSpec::new(PASSWORD, FieldKind::Secret)
                .label("Password")
                .aria_label("sign-up-password")
                .rule(Rule::required("Please input your password!"))
                .rule(Rule::min_length(min_length, "Your password is too short."))
                .validate_first(true)
                .validate_trigger(Trigger::Blur)
                .has_feedback(true),
            FieldSpec::new(CONFIRM, FieldKind::Secret)
                .label("Confirm Password")
                .aria_label("sign-up-password-confirm")
                .rule(Rule::required("Please confirm your password!"))
                .rule(Rule::min_length(min_length, "Your password is too short."))
                .rule(Rule::matches_field(PASSWORD, "Your passwords are different."))
                .validate_first(true)
                .validate_trigger(Trigger::Blur)
                .depends_on(PASSWORD)
                .has_feedback(true),
        ],
    )
}

/// The typed result of a valid sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpValues {
    /// Trimmed personal name.
    pub username: String,
    /// Trimmed e-mail address.
    pub email: String,
    /// The password, verbatim.
    pub password: Secret,
}

impl TryFrom<&CleanedValues> for SignUpValues {
    type Error = PorticoError;

    fn try_from(values: &CleanedValues) -> Result<Self, Self::Error> {
        let text = |name: &str| {
            values
                .get_str(name)
                .map(ToString::to_string)
                .ok_or_else(|| missing(name))
        };
        let password = match values.get(PASSWORD) {
            Some(FieldValue::Secret(secret)) => secret.clone(),
            Some(other) => Secret::new(other.as_str()),
            None => return Err(missing(PASSWORD)),
        };
        Ok(Self {
            username: text(USERNAME)?,
            email: text(EMAIL)?,
            password,
        })
    }
}

fn missing(field: &str) -> PorticoError {
    PorticoError::Validation(portico_core::ValidationError::new(
        format!("Missing cleaned value for '{field}'"),
        "missing",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Snapshot;

    fn snapshot(username: &str, email: &str, password: &str, confirm: &str) -> Snapshot {
        Snapshot::from([
            (USERNAME.to_string(), username.to_string()),
            (EMAIL.to_string(), email.to_string()),
            (PASSWORD.to_string(), password.to_string()),
            (CONFIRM.to_string(), confirm.to_string()),
        ])
    }

    #[test]
    fn test_signup_form_shape() {
        let form = signup_form_with_min_length(6).unwrap();
        let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, [USERNAME, EMAIL, PASSWORD, CONFIRM]);
        assert_eq!(form.dependents_of(PASSWORD), [CONFIRM]);
        assert!(form.fields().iter().all(|f| f.validate_first));
        assert!(form.fields().iter().all(|f| f.triggers_on(Trigger::Blur)));
    }

    #[test]
    fn test_default_form_uses_settings() {
        let form = signup_form().unwrap();
        let errors = form
            .validate(&snapshot("Jane", "jane@x.com", "12345", "12345"))
            .unwrap_err();
        assert_eq!(errors[PASSWORD], "Your password is too short.");
    }

    #[test]
    fn test_valid_signup() {
        let form = signup_form_with_min_length(6).unwrap();
        let cleaned = form
            .validate(&snapshot(" Jane Doe ", "jane@x.com ", "secret1", "secret1"))
            .unwrap();
        let values = SignUpValues::try_from(&cleaned).unwrap();
        assert_eq!(values.username, "Jane Doe");
        assert_eq!(values.email, "jane@x.com");
        assert_eq!(values.password.expose(), "secret1");
    }

    #[test]
    fn test_all_empty_reports_required_messages() {
        let form = signup_form_with_min_length(6).unwrap();
        let errors = form.validate(&snapshot("", "", "", "")).unwrap_err();
        assert_eq!(errors[USERNAME], "Please input your name!");
        assert_eq!(errors[EMAIL], "Please input your E-mail!");
        assert_eq!(errors[PASSWORD], "Please input your password!");
        assert_eq!(errors[CONFIRM], "Please confirm your password!");
    }

    #[test]
    fn test_blank_username_rejected() {
        let form = signup_form_with_min_length(6).unwrap();
        let errors = form
            .validate(&snapshot("   ", "jane@x.com", "secret1", "secret1"))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[USERNAME], "Please input your name!");
    }

    #[test]
    fn test_invalid_email_reports_pattern_message() {
        let form = signup_form_with_min_length(6).unwrap();
        let errors = form
            .validate(&snapshot("Jane", "jane-at-x", "secret1", "secret1"))
            .unwrap_err();
        assert_eq!(errors[EMAIL], "The input is not valid E-mail!");
    }

    #[test]
    fn test_short_confirm_reports_length_before_mismatch() {
        let form = signup_form_with_min_length(6).unwrap();
        let errors = form
            .validate(&snapshot("Jane", "jane@x.com", "secret1", "abc"))
            .unwrap_err();
        assert_eq!(errors[CONFIRM], "Your password is too short.");
    }

    #[test]
    fn test_missing_cleaned_value() {
        let err = SignUpValues::try_from(&CleanedValues::default()).unwrap_err();
        assert!(matches!(err, PorticoError::Validation(_)));
    }
}
