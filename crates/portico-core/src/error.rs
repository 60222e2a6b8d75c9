//! Core error types for portico.
//!
//! [`PorticoError`] covers the four failure families the system knows about:
//! per-field validation failures, authorization denials, failed external
//! submissions, and completions that arrive after their form is gone. A few
//! supporting variants cover resolver lookups and configuration loading.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// The fixed message reported for every authorization denial.
///
/// Denials never say whether the resource exists or why access failed.
pub const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated as user.";

/// A validation failure, either for a single value or for a whole form.
///
/// Compound errors carry the first failing message of each field, keyed by
/// field name. Keys are ordered so that rendering is deterministic.
///
/// # Examples
///
/// ```
/// use portico_core::error::ValidationError;
///
/// let err = ValidationError::new("Please input your E-mail!", "required");
/// assert_eq!(err.to_string(), "Please input your E-mail!");
///
/// let mut fields = std::collections::BTreeMap::new();
/// fields.insert("email".to_string(), "The input is not valid E-mail!".to_string());
/// let err = ValidationError::with_field_errors(fields);
/// assert_eq!(err.field("email"), Some("The input is not valid E-mail!"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the failure (e.g. "required", "invalid").
    pub code: String,
    /// First error message per failing field.
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: BTreeMap<String, String>) -> Self {
        Self {
            message: String::new(),
            code: "invalid".to_string(),
            field_errors,
        }
    }

    /// Returns the error recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            return write!(f, "{}", self.message);
        }
        let mut first = true;
        for (field, error) in &self.field_errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for portico.
#[derive(Error, Debug)]
pub enum PorticoError {
    // ── Form input ───────────────────────────────────────────────────

    /// One or more fields failed validation. User-correctable.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    // ── Authorization ────────────────────────────────────────────────

    /// An authorization gate denied the operation before it ran.
    #[error("Not authenticated as user.")]
    Unauthorized,

    // ── Submission ───────────────────────────────────────────────────

    /// The external sign-up operation failed. The reason is user-facing.
    #[error("{0}")]
    SubmissionFailed(String),

    /// An async result arrived after the form that requested it was gone.
    #[error("Completion arrived after its form was unmounted")]
    StaleCompletion,

    // ── Resolvers ────────────────────────────────────────────────────

    /// The requested resolver or record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A resolver failed for a reason of its own.
    #[error("Operation failed: {0}")]
    Operation(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PorticoError {
    /// Returns the machine-readable error code used in API error payloads.
    ///
    /// - `Validation` -> `BAD_USER_INPUT`
    /// - `Unauthorized` -> `UNAUTHENTICATED`
    /// - `SubmissionFailed` -> `SUBMISSION_FAILED`
    /// - `StaleCompletion` -> `STALE_COMPLETION`
    /// - `NotFound` -> `NOT_FOUND`
    /// - everything else -> `INTERNAL_SERVER_ERROR`
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "BAD_USER_INPUT",
            Self::Unauthorized => "UNAUTHENTICATED",
            Self::SubmissionFailed(_) => "SUBMISSION_FAILED",
            Self::StaleCompletion => "STALE_COMPLETION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Operation(_) | Self::Configuration(_) | Self::Io(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<ValidationError> for PorticoError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// A convenience type alias for `Result<T, PorticoError>`.
pub type PorticoResult<T> = Result<T, PorticoError>;
