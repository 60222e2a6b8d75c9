//! Validation rules.
//!
//! A [`Rule`] checks one candidate value, with the current values of every
//! field available for cross-field checks. Only `Required` looks at empty
//! values: every other rule passes on an empty string, so a chain reports
//! "missing" and "malformed" independently of rule order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use portico_core::PorticoError;

/// Current raw values of every field in a form, keyed by field name.
pub type Snapshot = HashMap<String, String>;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// The result of a custom predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The value is acceptable.
    Pass,
    /// The value is rejected, optionally with a message replacing the rule's own.
    Fail(Option<String>),
}

/// A cross-field predicate: `(candidate, snapshot) -> outcome`.
pub type CustomPredicate = Arc<dyn Fn(&str, &Snapshot) -> RuleOutcome + Send + Sync>;

/// A built-in pattern a value must match.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// An e-mail address.
    Email,
    /// An arbitrary regular expression.
    Regex(Regex),
}

impl PatternKind {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Email => EMAIL_RE.is_match(value.trim()),
            Self::Regex(re) => re.is_match(value),
        }
    }
}

/// A single validation rule with its failure message.
#[derive(Clone)]
pub enum Rule {
    /// The value must be non-empty.
    Required {
        /// Message reported on failure.
        message: String,
        /// Treat whitespace-only values as empty.
        whitespace: bool,
    },
    /// The value must have at least `min` characters.
    MinLength {
        /// Minimum length in characters.
        min: usize,
        /// Message reported on failure.
        message: String,
    },
    /// The value must match a pattern.
    Pattern {
        /// The pattern to match.
        kind: PatternKind,
        /// Message reported on failure.
        message: String,
    },
    /// The value must satisfy a predicate that may inspect other fields.
    Custom {
        /// The predicate.
        predicate: CustomPredicate,
        /// Message reported when the predicate fails without its own.
        message: String,
    },
}

impl Rule {
    /// A `Required` rule where whitespace-only input still counts as present.
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
            whitespace: false,
        }
    }

    /// A `Required` rule that rejects whitespace-only input too.
    pub fn required_non_blank(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
            whitespace: true,
        }
    }

    /// A minimum-length rule.
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    /// An e-mail pattern rule.
    pub fn email(message: impl Into<String>) -> Self {
        Self::Pattern {
            kind: PatternKind::Email,
            message: message.into(),
        }
    }

    /// A regular-expression pattern rule.
    pub fn regex(pattern: &str, message: impl Into<String>) -> Result<Self, PorticoError> {
        let re = Regex::new(pattern)
            .map_err(|e| PorticoError::Configuration(format!("Invalid pattern '{pattern}': {e}")))?;
        Ok(Self::Pattern {
            kind: PatternKind::Regex(re),
            message: message.into(),
        })
    }

    /// A custom rule.
    pub fn custom<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &Snapshot) -> RuleOutcome + Send + Sync + 'static,
    {
        Self::Custom {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// A custom rule requiring the value to equal the current value of `other`.
    pub fn matches_field(other: impl Into<String>, message: impl Into<String>) -> Self {
        let other = other.into();
        Self::custom(message, move |value, snapshot| {
            if snapshot.get(&other).map_or("", String::as_str) == value {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail(None)
            }
        })
    }

    /// Returns `true` for `Required` rules.
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// Checks `value` against this rule, returning the failure message.
    pub fn check(&self, value: &str, snapshot: &Snapshot) -> Result<(), String> {
        if let Self::Required {
            message,
            whitespace,
        } = self
        {
            let empty = if *whitespace {
                value.trim().is_empty()
            } else {
                value.is_empty()
            };
            return if empty { Err(message.clone()) } else { Ok(()) };
        }

        if value.is_empty() {
            return Ok(());
        }

        match self {
            Self::Required { .. } => Ok(()),
            Self::MinLength { min, message } => {
                if value.chars().count() < *min {
                    Err(message.clone())
                } else {
                    Ok(())
                }
            }
            Self::Pattern { kind, message } => {
                if kind.is_match(value) {
                    Ok(())
                } else {
                    Err(message.clone())
                }
            }
            Self::Custom { predicate, message } => match predicate(value, snapshot) {
                RuleOutcome::Pass => Ok(()),
                RuleOutcome::Fail(custom) => Err(custom.unwrap_or_else(|| message.clone())),
            },
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required {
                message,
                whitespace,
            } => f
                .debug_struct("Required")
                .field("message", message)
                .field("whitespace", whitespace)
                .finish(),
            Self::MinLength { min, message } => f
                .debug_struct("MinLength")
                .field("min", min)
                .field("message", message)
                .finish(),
            Self::Pattern { kind, message } => f
                .debug_struct("Pattern")
                .field("kind", kind)
                .field("message", message)
                .finish(),
            Self::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}
