//! # portico-views
//!
//! The sign-up screen's behaviour. A
//! [`SubmissionController`](submission::SubmissionController) owns the mounted
//! form state, validates on submit, calls the external
//! [`SignUpClient`](client::SignUpClient) at most once at a time, and reports
//! progress through a [`Notifier`](messages::Notifier) and a
//! [`Navigator`](navigation::Navigator).
//!
//! ## Modules
//!
//! - [`client`] - The external sign-up operation
//! - [`messages`] - Keyed notifications
//! - [`navigation`] - Route changes
//! - [`submission`] - The submission state machine

pub mod client;
pub mod messages;
pub mod navigation;
pub mod submission;

pub use client::{SignUpClient, SignUpError, SignUpRequest};
pub use messages::{Notification, NotificationKind, Notifier};
pub use navigation::Navigator;
pub use submission::{SubmissionController, SubmissionStatus, SubmitEvent, SubmitOutcome};
