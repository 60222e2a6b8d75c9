//! Field definitions.
//!
//! A [`FieldSpec`] describes one input of a form: its kind, its ordered rule
//! chain, which user events run that chain, and which other fields it
//! depends on. [`FieldKind`] controls how a raw value is cleaned into a
//! [`FieldValue`] once the whole form validates.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::Rule;

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text. Cleaned by trimming.
    Text,
    /// An e-mail address. Cleaned by trimming.
    Email,
    /// A password or other secret. Kept verbatim and redacted in debug output.
    Secret,
}

impl FieldKind {
    /// Returns the HTML input type used to render this kind.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Secret => "password",
        }
    }

    /// Cleans a raw input string into a typed value.
    pub fn clean(self, raw: &str) -> FieldValue {
        match self {
            Self::Text => FieldValue::Text(raw.trim().to_string()),
            Self::Email => FieldValue::Email(raw.trim().to_string()),
            Self::Secret => FieldValue::Secret(Secret::new(raw)),
        }
    }
}

/// A user event that can run a field's rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// The field lost focus.
    Blur,
    /// The field's value changed.
    Change,
}

/// A secret string whose contents never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret contents.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(\"***\")")
    }
}

/// A cleaned, typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Trimmed text.
    Text(String),
    /// Trimmed e-mail address.
    Email(String),
    /// Untouched secret.
    Secret(Secret),
}

impl FieldValue {
    /// Returns the underlying string, exposing secrets.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Email(s) => s,
            Self::Secret(s) => s.expose(),
        }
    }

    /// Returns the kind this value was cleaned as.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Email(_) => FieldKind::Email,
            Self::Secret(_) => FieldKind::Secret,
        }
    }
}

/// Complete definition of a form field.
///
/// Built with a consuming builder:
///
/// ```
/// use portico_forms::fields::{FieldKind, FieldSpec, Trigger};
/// use portico_forms::rules::Rule;
///
/// let field = FieldSpec::new("email", FieldKind::Email)
///     .label("E-mail")
///     .rule(Rule::email("The input is not valid E-mail!"))
///     .rule(Rule::required("Please input your E-mail!"))
///     .validate_first(true)
///     .validate_trigger(Trigger::Blur);
///
/// assert!(field.is_required());
/// assert!(field.triggers_on(Trigger::Blur));
/// assert!(!field.triggers_on(Trigger::Change));
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// The field name. Unique within a form.
    pub name: String,
    /// What kind of value the field holds.
    pub kind: FieldKind,
    /// Human-readable label.
    pub label: String,
    /// Accessible name for the rendered input.
    pub aria_label: Option<String>,
    /// Rules, evaluated in order.
    pub rules: Vec<Rule>,
    /// Stop at the first failing rule.
    pub validate_first: bool,
    /// Events that run this field's rule chain.
    pub triggers: HashSet<Trigger>,
    /// Fields whose changes force this field to revalidate.
    pub depends_on: Vec<String>,
    /// Whether the rendered field shows a success/error status icon.
    pub has_feedback: bool,
}

impl FieldSpec {
    /// Creates a field with no rules that validates on change.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            kind,
            label,
            aria_label: None,
            rules: Vec::new(),
            validate_first: false,
            triggers: HashSet::from([Trigger::Change]),
            depends_on: Vec::new(),
            has_feedback: false,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the accessible name.
    #[must_use]
    pub fn aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.aria_label = Some(aria_label.into());
        self
    }

    /// Appends a rule to the chain.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets fail-fast evaluation.
    #[must_use]
    pub fn validate_first(mut self, validate_first: bool) -> Self {
        self.validate_first = validate_first;
        self
    }

    /// Replaces the trigger set with a single trigger.
    #[must_use]
    pub fn validate_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers = HashSet::from([trigger]);
        self
    }

    /// Adds a trigger to the trigger set.
    #[must_use]
    pub fn also_validate_on(mut self, trigger: Trigger) -> Self {
        self.triggers.insert(trigger);
        self
    }

    /// Declares that changes to `field` force this field to revalidate.
    #[must_use]
    pub fn depends_on(mut self, field: impl Into<String>) -> Self {
        self.depends_on.push(field.into());
        self
    }

    /// Sets whether the rendered field shows a status icon.
    #[must_use]
    pub fn has_feedback(mut self, has_feedback: bool) -> Self {
        self.has_feedback = has_feedback;
        self
    }

    /// Returns `true` if `trigger` runs this field's rule chain.
    pub fn triggers_on(&self, trigger: Trigger) -> bool {
        self.triggers.contains(&trigger)
    }

    /// Returns `true` if the chain contains a `Required` rule.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(Rule::is_required)
    }
}
