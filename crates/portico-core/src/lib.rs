//! # portico-core
//!
//! Core types shared by every portico crate. This crate has no portico
//! dependencies and provides the foundation for the others.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Settings and the global settings container
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{PorticoError, PorticoResult, ValidationError};
pub use settings::{NotificationSettings, RouteSettings, Settings, SETTINGS};
