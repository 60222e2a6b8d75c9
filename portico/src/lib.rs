//! # portico
//!
//! A sign-up screen and its API guard, as a library.
//!
//! This is the meta-crate that re-exports the sub-crates behind cargo
//! features. Depend on `portico` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ```
//! use portico::prelude::*;
//!
//! let form = signup_form().unwrap();
//! let mut state = FormState::new(&form);
//! state.apply(&form, FieldEvent::change("confirm", "secret1"));
//! state.apply(&form, FieldEvent::blur("confirm"));
//! assert_eq!(state.error("confirm"), Some("Your passwords are different."));
//! ```

/// Errors, settings, and logging.
pub use portico_core as core;

/// Form validation engine.
#[cfg(feature = "forms")]
pub use portico_forms as forms;

/// Resolver authorization gate and query root.
#[cfg(feature = "auth")]
pub use portico_auth as auth;

/// Submission controller, notifications, and navigation.
#[cfg(feature = "views")]
pub use portico_views as views;

/// Testing utilities.
#[cfg(feature = "testing")]
pub use portico_test as test;

use std::path::Path;

use portico_core::{settings_loader, PorticoResult, Settings, SETTINGS};

/// Loads settings, installs them as the global [`SETTINGS`], and starts
/// logging.
///
/// `config` may name a `.toml` or `.json` file; `PORTICO_*` environment
/// variables override it. Fails if the global settings were already
/// configured.
///
/// ```rust,no_run
/// let settings = portico::setup(Some(std::path::Path::new("config/portico.toml"))).unwrap();
/// assert!(settings.password_min_length > 0);
/// ```
pub fn setup(config: Option<&Path>) -> PorticoResult<&'static Settings> {
    let settings = SETTINGS.try_configure(settings_loader::load(config)?)?;
    portico_core::logging::setup_logging(settings);
    tracing::debug!(debug = settings.debug, log_level = %settings.log_level, "portico configured");
    Ok(settings)
}

// Third-party re-exports
pub use async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;

/// The types most applications need.
pub mod prelude {
    pub use crate::setup;
    pub use portico_core::logging::setup_logging;
    pub use portico_core::{PorticoError, PorticoResult, Settings, SETTINGS};

    #[cfg(feature = "forms")]
    pub use portico_forms::{
        field_props, signup_form, FieldEvent, FieldProps, FormSpec, FormState, Rule, SignUpValues,
    };

    #[cfg(feature = "auth")]
    pub use portico_auth::{
        me, signup_query_root, with_guard, IsAuthenticated, Operation, Predicate, PredicateExt,
        Principal, QueryRoot, ResolverContext,
    };

    #[cfg(feature = "views")]
    pub use portico_views::{
        Navigator, Notification, Notifier, SignUpClient, SignUpError, SignUpRequest, SubmissionController,
        SubmitEvent, SubmitOutcome,
    };
}
