//! Field-level and form-level validation.
//!
//! Both entry points are pure functions of the form declaration and a value
//! snapshot:
//!
//! 1. [`validate_field`] runs one field's rule chain in declared order,
//!    stopping at the first failure when the field is fail-fast.
//! 2. [`validate_form`] runs every field independently and either returns
//!    the cleaned values or the first error of each failing field.

use std::collections::BTreeMap;

use crate::fields::{FieldSpec, FieldValue};
use crate::form::FormSpec;
use crate::rules::Snapshot;

/// First error message per failing field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// The cleaned values of a fully valid form.
///
/// Holds exactly the declared fields, each cleaned according to its kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedValues {
    values: BTreeMap<String, FieldValue>,
}

impl CleanedValues {
    /// Returns the cleaned value of `field`.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Returns the cleaned value of `field` as a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(FieldValue::as_str)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over field names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Runs `field`'s rule chain against `value`.
///
/// Returns every failing message in declared order, or only the first one
/// when the field is fail-fast.
pub fn validate_field(field: &FieldSpec, value: &str, snapshot: &Snapshot) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    for rule in &field.rules {
        if let Err(message) = rule.check(value, snapshot) {
            errors.push(message);
            if field.validate_first {
                break;
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates every declared field of `form` against `snapshot`.
///
/// Fields missing from the snapshot are validated as empty; snapshot keys
/// that are not declared fields are ignored. Errors accumulate across fields
/// (no short-circuiting between fields).
pub fn validate_form(form: &FormSpec, snapshot: &Snapshot) -> Result<CleanedValues, FieldErrors> {
    let mut values = BTreeMap::new();
    let mut errors = FieldErrors::new();

    for field in form.fields() {
        let raw = snapshot.get(&field.name).map_or("", String::as_str);
        match validate_field(field, raw, snapshot) {
            Ok(()) => {
                values.insert(field.name.clone(), field.kind.clean(raw));
            }
            Err(messages) => {
                if let Some(first) = messages.into_iter().next() {
                    errors.insert(field.name.clone(), first);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(CleanedValues { values })
    } else {
        Err(errors)
    }
}
