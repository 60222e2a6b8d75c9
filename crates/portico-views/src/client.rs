//! The external sign-up operation.

use async_trait::async_trait;
use portico_forms::{Secret, SignUpValues};
use thiserror::Error;

/// What the sign-up client receives: the cleaned form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    /// Personal name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: Secret,
}

impl From<SignUpValues> for SignUpRequest {
    fn from(values: SignUpValues) -> Self {
        Self {
            username: values.username,
            email: values.email,
            password: values.password,
        }
    }
}

/// A failed sign-up. `message` is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SignUpError {
    /// User-facing reason.
    pub message: String,
}

impl SignUpError {
    /// Creates a new error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SignUpError> for portico_core::PorticoError {
    fn from(err: SignUpError) -> Self {
        Self::SubmissionFailed(err.message)
    }
}

/// Creates accounts.
///
/// Implementations are expected to finish eventually; the controller does not
/// impose a timeout.
#[async_trait]
pub trait SignUpClient: Send + Sync {
    /// Creates the account described by `request`.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError>;
}
