//! Field props: form state bound to field declarations.
//!
//! [`field_props`] is a pure function from a form declaration and its state
//! to the props each input needs to render. Inputs report back through the
//! events built by [`FieldProps::change_event`] and
//! [`FieldProps::blur_event`], which go to [`FormState::apply`].

use serde::Serialize;

use crate::fields::FieldKind;
use crate::form::FormSpec;
use crate::state::{FieldEvent, FormState};

/// The status icon shown next to a field that has feedback enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// No icon.
    None,
    /// The field is touched and valid.
    Success,
    /// The field shows an error.
    Error,
}

/// Everything an input needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProps {
    /// Field name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Accessible name.
    pub aria_label: Option<String>,
    /// HTML input type.
    pub input_type: &'static str,
    /// Current raw value.
    pub value: String,
    /// Visible error.
    pub error: Option<String>,
    /// Whether the field carries a `Required` rule.
    pub required: bool,
    /// Status icon.
    pub feedback: Feedback,
}

impl FieldProps {
    /// Builds the event for a new input value.
    pub fn change_event(&self, value: impl Into<String>) -> FieldEvent {
        FieldEvent::change(self.name.clone(), value)
    }

    /// Builds the event for losing focus.
    pub fn blur_event(&self) -> FieldEvent {
        FieldEvent::blur(self.name.clone())
    }

    /// Returns `true` for password inputs.
    pub fn is_secret(&self) -> bool {
        self.input_type == FieldKind::Secret.input_type()
    }
}

/// Binds `state` to `form`, returning props in declaration order.
pub fn field_props(form: &FormSpec, state: &FormState) -> Vec<FieldProps> {
    form.fields()
        .iter()
        .map(|spec| {
            let field = state.field(&spec.name).cloned().unwrap_or_default();
            let feedback = match (spec.has_feedback, field.touched, field.error.is_some()) {
                (true, _, true) => Feedback::Error,
                (true, true, false) => Feedback::Success,
                _ => Feedback::None,
            };
            FieldProps {
                name: spec.name.clone(),
                label: spec.label.clone(),
                aria_label: spec.aria_label.clone(),
                input_type: spec.kind.input_type(),
                value: field.value,
                error: field.error,
                required: spec.is_required(),
                feedback,
            }
        })
        .collect()
}
