//! # portico-test
//!
//! Testing utilities for portico. Provides stand-ins for the collaborators of
//! the submission controller that record what they were asked to do, plus a
//! harness that wires them to a mounted sign-up form.
//!
//! ## Modules
//!
//! - [`scripted_client`] - A sign-up client with scripted responses and a hold switch
//! - [`recorders`] - Recording notifier and navigator
//! - [`harness`] - A mounted sign-up controller with recording collaborators

pub mod harness;
pub mod recorders;
pub mod scripted_client;

pub use harness::{SignUpFixture, SignUpHarness};
pub use recorders::{RecordingNavigator, RecordingNotifier};
pub use scripted_client::ScriptedSignUpClient;
