//! Principals and resolver contexts.
//!
//! The context is built once per resolver execution by whatever sits in front
//! of the resolvers (session lookup, token verification) and handed to
//! operations behind an `Arc`, so operations can read it but never change it.

use serde::{Deserialize, Serialize};

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable user id.
    pub uid: String,
    /// The user's e-mail address.
    pub email: String,
}

impl Principal {
    /// Creates a new principal.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// Contexts that may carry an authenticated principal.
pub trait HasPrincipal {
    /// Returns the principal, if the request is authenticated.
    fn principal(&self) -> Option<&Principal>;
}

/// The context passed to every resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverContext {
    /// The authenticated user, if any.
    pub me: Option<Principal>,
}

impl ResolverContext {
    /// A context without a principal.
    pub const fn anonymous() -> Self {
        Self { me: None }
    }

    /// A context authenticated as `principal`.
    pub const fn authenticated(principal: Principal) -> Self {
        Self { me: Some(principal) }
    }
}

impl HasPrincipal for ResolverContext {
    fn principal(&self) -> Option<&Principal> {
        self.me.as_ref()
    }
}
