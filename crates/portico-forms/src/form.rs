//! Form specs and the field dependency graph.
//!
//! A [`FormSpec`] is the immutable declaration of a form: its fields in
//! display order plus the reverse of every `depends_on` edge, so that a
//! change to one field can find the fields that must revalidate because of
//! it. Construction rejects duplicate names and edges to unknown fields.

use std::collections::{HashMap, HashSet};

use portico_core::{PorticoError, PorticoResult};

use crate::fields::FieldSpec;
use crate::rules::Snapshot;
use crate::validation::{self, CleanedValues, FieldErrors};

/// The declaration of a form.
#[derive(Debug, Clone)]
pub struct FormSpec {
    name: String,
    fields: Vec<FieldSpec>,
    dependents: HashMap<String, Vec<String>>,
}

impl FormSpec {
    /// Creates a form from its fields, building the dependency graph.
    ///
    /// # Errors
    ///
    /// Returns [`PorticoError::Configuration`] if two fields share a name, a
    /// field depends on itself, or a field depends on an undeclared field.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> PorticoResult<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(PorticoError::Configuration(format!(
                    "Form '{name}' declares field '{}' more than once",
                    field.name
                )));
            }
        }

        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        for field in &fields {
            for source in &field.depends_on {
                if source == &field.name {
                    return Err(PorticoError::Configuration(format!(
                        "Field '{}' of form '{name}' depends on itself",
                        field.name
                    )));
                }
                if !seen.contains(source.as_str()) {
                    return Err(PorticoError::Configuration(format!(
                        "Field '{}' of form '{name}' depends on unknown field '{source}'",
                        field.name
                    )));
                }
                let targets = dependents.entry(source.clone()).or_default();
                if !targets.contains(&field.name) {
                    targets.push(field.name.clone());
                }
            }
        }

        Ok(Self {
            name,
            fields,
            dependents,
        })
    }

    /// Returns the form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the fields that directly depend on `name`, in declaration order.
    pub fn dependents_of(&self, name: &str) -> &[String] {
        self.dependents.get(name).map_or(&[], Vec::as_slice)
    }

    /// Validates a full snapshot. See [`validation::validate_form`].
    pub fn validate(&self, snapshot: &Snapshot) -> Result<CleanedValues, FieldErrors> {
        validation::validate_form(self, snapshot)
    }
}
