//! Per-mount form state and user events.
//!
//! [`FormState`] is created when a form mounts and dropped when it unmounts.
//! User input reaches it only through [`FormState::apply`], which stores the
//! event, runs the rule chains the event triggers, and then walks the
//! dependency graph so that dirty dependents revalidate against the new
//! snapshot. A field that was never touched never shows an error until the
//! form is submitted.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::fields::Trigger;
use crate::form::FormSpec;
use crate::rules::Snapshot;
use crate::validation::{validate_field, CleanedValues, FieldErrors};

/// The state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// The current raw value.
    pub value: String,
    /// The field has lost focus at least once.
    pub touched: bool,
    /// The user has interacted with the field (left it holding a value).
    pub dirty: bool,
    /// The visible error, if any.
    pub error: Option<String>,
}

/// A user interaction with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The value of `field` became `value`.
    Change {
        /// Field name.
        field: String,
        /// New raw value.
        value: String,
    },
    /// `field` lost focus.
    Blur {
        /// Field name.
        field: String,
    },
}

impl FieldEvent {
    /// A change event.
    pub fn change(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Change {
            field: field.into(),
            value: value.into(),
        }
    }

    /// A blur event.
    pub fn blur(field: impl Into<String>) -> Self {
        Self::Blur {
            field: field.into(),
        }
    }

    /// The field this event targets.
    pub fn field(&self) -> &str {
        match self {
            Self::Change { field, .. } | Self::Blur { field } => field,
        }
    }
}

/// Values, interaction flags, and visible errors of a mounted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: HashMap<String, FieldState>,
}

impl FormState {
    /// Creates the state of a freshly mounted form: every field empty,
    /// untouched, and without errors.
    pub fn new(form: &FormSpec) -> Self {
        let fields = form
            .fields()
            .iter()
            .map(|f| (f.name.clone(), FieldState::default()))
            .collect();
        Self { fields }
    }

    /// Creates mounted state pre-filled with `initial` values.
    ///
    /// Pre-filled values do not mark fields touched or dirty.
    pub fn with_initial(form: &FormSpec, initial: &Snapshot) -> Self {
        let mut state = Self::new(form);
        for (name, field) in &mut state.fields {
            if let Some(value) = initial.get(name) {
                field.value.clone_from(value);
            }
        }
        state
    }

    /// Returns the state of `name`.
    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    /// Returns the current raw value of `name` (empty if unknown).
    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", |f| f.value.as_str())
    }

    /// Returns the visible error of `name`.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|f| f.error.as_deref())
    }

    /// Returns every visible error.
    pub fn errors(&self) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|(name, f)| f.error.clone().map(|e| (name.clone(), e)))
            .collect()
    }

    /// Returns `true` if any field shows an error.
    pub fn has_errors(&self) -> bool {
        self.fields.values().any(|f| f.error.is_some())
    }

    /// Returns the current raw values of every field.
    pub fn snapshot(&self) -> Snapshot {
        self.fields
            .iter()
            .map(|(name, f)| (name.clone(), f.value.clone()))
            .collect()
    }

    /// Applies a user event and returns the names of the fields whose rule
    /// chains ran, in the order they ran.
    ///
    /// Events for fields the form does not declare are ignored.
    pub fn apply(&mut self, form: &FormSpec, event: FieldEvent) -> Vec<String> {
        let Some(spec) = form.field(event.field()) else {
            warn!(form = form.name(), field = event.field(), "ignoring event for undeclared field");
            return Vec::new();
        };
        let name = spec.name.clone();

        let trigger = match event {
            FieldEvent::Change { value, .. } => {
                if let Some(field) = self.fields.get_mut(&name) {
                    field.value = value;
                }
                Trigger::Change
            }
            FieldEvent::Blur { .. } => {
                if let Some(field) = self.fields.get_mut(&name) {
                    field.touched = true;
                    if !field.value.is_empty() {
                        field.dirty = true;
                    }
                }
                Trigger::Blur
            }
        };

        let snapshot = self.snapshot();
        let mut ran = Vec::new();

        if spec.triggers_on(trigger) {
            self.revalidate(form, &name, &snapshot);
            ran.push(name.clone());
        }

        for dependent in form.dependents_of(&name) {
            let dirty = self.fields.get(dependent).is_some_and(|f| f.dirty);
            if dirty {
                debug!(form = form.name(), source = %name, field = %dependent, "revalidating dependent field");
                self.revalidate(form, dependent, &snapshot);
                ran.push(dependent.clone());
            }
        }

        ran
    }

    /// Submit-time validation: marks every field touched, records each
    /// field's first error (clearing errors of valid fields), and returns the
    /// form result.
    pub fn validate_all(&mut self, form: &FormSpec) -> Result<CleanedValues, FieldErrors> {
        for field in self.fields.values_mut() {
            field.touched = true;
        }

        let result = form.validate(&self.snapshot());
        let errors = result.as_ref().err();
        for (name, field) in &mut self.fields {
            field.error = errors.and_then(|e| e.get(name).cloned());
        }
        result
    }

    fn revalidate(&mut self, form: &FormSpec, name: &str, snapshot: &Snapshot) {
        let Some(spec) = form.field(name) else {
            return;
        };
        let value = snapshot.get(name).map_or("", String::as_str);
        let error = validate_field(spec, value, snapshot)
            .err()
            .and_then(|errors| errors.into_iter().next());
        if let Some(field) = self.fields.get_mut(name) {
            field.error = error;
        }
    }
}
