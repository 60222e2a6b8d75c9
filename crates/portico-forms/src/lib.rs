//! # portico-forms
//!
//! Form validation engine for portico. Forms are declared as a list of
//! [`FieldSpec`](fields::FieldSpec)s with ordered rule chains and explicit
//! dependency edges; [`FormState`](state::FormState) tracks what the user has
//! typed and touched, and [`field_props`](bound_field::field_props) turns that
//! state into render-ready props.
//!
//! ## Modules
//!
//! - [`fields`] - Field specs, kinds, triggers, and cleaned values
//! - [`rules`] - Validation rules and their evaluation
//! - [`form`] - Form specs and the field dependency graph
//! - [`validation`] - Field-level and form-level validation
//! - [`state`] - Mutable per-mount form state and user events
//! - [`bound_field`] - Pure state-to-props binding
//! - [`signup`] - The sign-up form definition

pub mod bound_field;
pub mod fields;
pub mod form;
pub mod rules;
pub mod signup;
pub mod state;
pub mod validation;

pub use bound_field::{field_props, Feedback, FieldProps};
pub use fields::{FieldKind, FieldSpec, FieldValue, Secret, Trigger};
pub use form::FormSpec;
pub use rules::{PatternKind, Rule, RuleOutcome, Snapshot};
pub use signup::{signup_form, SignUpValues};
pub use state::{FieldEvent, FieldState, FormState};
pub use validation::{validate_field, validate_form, CleanedValues, FieldErrors};
