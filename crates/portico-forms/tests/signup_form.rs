//! Behaviour of the sign-up form as a user fills it in.

use portico_forms::signup::{signup_form_with_min_length, CONFIRM, EMAIL, PASSWORD, USERNAME};
use portico_forms::{field_props, Feedback, FieldEvent, FormSpec, FormState, SignUpValues};
use proptest::prelude::*;

const MISMATCH: &str = "Your passwords are different.";

/// Passwords that satisfy every password rule on their own.
const PASSWORD_PATTERN: &str = "[a-zA-Z0-9!@#$%^&*]{6,24}";

fn mounted() -> (FormSpec, FormState) {
    let form = signup_form_with_min_length(6).unwrap();
    let state = FormState::new(&form);
    (form, state)
}

fn type_and_leave(form: &FormSpec, state: &mut FormState, field: &str, value: &str) {
    state.apply(form, FieldEvent::change(field, value));
    state.apply(form, FieldEvent::blur(field));
}

#[test]
fn test_fresh_form_shows_no_errors() {
    let (form, state) = mounted();
    let props = field_props(&form, &state);
    assert_eq!(props.len(), 4);
    assert!(props.iter().all(|p| p.error.is_none()));
    assert!(props.iter().all(|p| p.value.is_empty()));
}

#[test]
fn test_typing_does_not_validate_until_blur() {
    let (form, mut state) = mounted();
    state.apply(&form, FieldEvent::change(EMAIL, "not-an-email"));
    assert_eq!(state.error(EMAIL), None);
    state.apply(&form, FieldEvent::blur(EMAIL));
    assert_eq!(state.error(EMAIL), Some("The input is not valid E-mail!"));
}

#[test]
fn test_password_pairs() {
    let cases = [
        ("secret1", "", Some("Please confirm your password!")),
        ("secret1", "abc", Some("Your password is too short.")),
        ("secret1", "secret2", Some("Your passwords are different.")),
        ("secret1", "secret1", None),
    ];
    for (password, confirm, expected) in cases {
        let (form, mut state) = mounted();
        type_and_leave(&form, &mut state, PASSWORD, password);
        type_and_leave(&form, &mut state, CONFIRM, confirm);
        assert_eq!(state.error(CONFIRM), expected, "password={password:?} confirm={confirm:?}");
    }
}

proptest! {
    #[test]
    fn test_confirm_mismatch_iff_different(
        password in PASSWORD_PATTERN,
        confirm in PASSWORD_PATTERN,
    ) {
        let (form, mut state) = mounted();
        type_and_leave(&form, &mut state, PASSWORD, &password);
        type_and_leave(&form, &mut state, CONFIRM, &confirm);
        let expected = (password != confirm).then_some(MISMATCH);
        prop_assert_eq!(state.error(CONFIRM), expected);
    }

    #[test]
    fn test_confirm_equal_to_password_passes(password in PASSWORD_PATTERN) {
        let (form, mut state) = mounted();
        type_and_leave(&form, &mut state, PASSWORD, &password);
        type_and_leave(&form, &mut state, CONFIRM, &password);
        prop_assert_eq!(state.error(CONFIRM), None);
    }

    #[test]
    fn test_confirm_typed_before_password(
        password in PASSWORD_PATTERN,
        confirm in PASSWORD_PATTERN,
    ) {
        let (form, mut state) = mounted();
        type_and_leave(&form, &mut state, CONFIRM, &confirm);
        prop_assert_eq!(state.error(CONFIRM), Some(MISMATCH));

        let ran = state.apply(&form, FieldEvent::change(PASSWORD, &password));
        prop_assert_eq!(ran, vec![CONFIRM.to_string()]);
        let expected = (password != confirm).then_some(MISMATCH);
        prop_assert_eq!(state.error(CONFIRM), expected);

        state.apply(&form, FieldEvent::change(PASSWORD, &confirm));
        prop_assert_eq!(state.error(CONFIRM), None);
    }
}

#[test]
fn test_password_change_revalidates_dirty_confirm() {
    let (form, mut state) = mounted();
    type_and_leave(&form, &mut state, PASSWORD, "secret1");
    type_and_leave(&form, &mut state, CONFIRM, "secret1");
    assert_eq!(state.error(CONFIRM), None);

    let ran = state.apply(&form, FieldEvent::change(PASSWORD, "secret2"));
    assert_eq!(ran, [CONFIRM]);
    assert_eq!(state.error(CONFIRM), Some("Your passwords are different."));

    state.apply(&form, FieldEvent::change(PASSWORD, "secret1"));
    assert_eq!(state.error(CONFIRM), None);
}

#[test]
fn test_password_change_leaves_untouched_confirm_alone() {
    let (form, mut state) = mounted();
    let ran = state.apply(&form, FieldEvent::change(PASSWORD, "secret1"));
    assert!(ran.is_empty());
    let ran = state.apply(&form, FieldEvent::blur(PASSWORD));
    assert_eq!(ran, [PASSWORD]);
    assert_eq!(state.error(CONFIRM), None);
}

#[test]
fn test_confirm_feedback_icons() {
    let (form, mut state) = mounted();
    type_and_leave(&form, &mut state, PASSWORD, "secret1");
    type_and_leave(&form, &mut state, CONFIRM, "secret9");
    let props = field_props(&form, &state);
    let confirm = props.iter().find(|p| p.name == CONFIRM).unwrap();
    assert_eq!(confirm.feedback, Feedback::Error);
    assert_eq!(confirm.input_type, "password");

    type_and_leave(&form, &mut state, CONFIRM, "secret1");
    let props = field_props(&form, &state);
    let confirm = props.iter().find(|p| p.name == CONFIRM).unwrap();
    assert_eq!(confirm.feedback, Feedback::Success);
}

#[test]
fn test_submit_validation_surfaces_every_error() {
    let (form, mut state) = mounted();
    type_and_leave(&form, &mut state, USERNAME, "Jane");
    let errors = state.validate_all(&form).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(!errors.contains_key(USERNAME));
    assert_eq!(state.error(EMAIL), Some("Please input your E-mail!"));
}

#[test]
fn test_complete_form_produces_values() {
    let (form, mut state) = mounted();
    type_and_leave(&form, &mut state, USERNAME, "  Jane Doe ");
    type_and_leave(&form, &mut state, EMAIL, "jane@example.com");
    type_and_leave(&form, &mut state, PASSWORD, "secret1");
    type_and_leave(&form, &mut state, CONFIRM, "secret1");

    let cleaned = state.validate_all(&form).unwrap();
    let values = SignUpValues::try_from(&cleaned).unwrap();
    assert_eq!(values.username, "Jane Doe");
    assert_eq!(values.email, "jane@example.com");
    assert_eq!(values.password.expose(), "secret1");
    assert!(!format!("{values:?}").contains("secret1"));
}
