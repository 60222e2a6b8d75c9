//! The submission state machine.
//!
//! ```text
//! Idle -> Validating -> Idle                            (invalid input)
//! Idle -> Validating -> Submitting -> Succeeded -> Idle
//! Idle -> Validating -> Submitting -> Failed -> Idle
//! Idle -> Validating -> Submitting -> Idle              (submit future dropped)
//! ```
//!
//! A [`SubmissionController`] is created when the sign-up screen mounts. It
//! owns the form state, so field events go through it too. At most one
//! submission runs at a time: a submit that arrives while another is
//! validating or waiting on the client is dropped. If the screen unmounts
//! while the client call is in flight, the eventual result is discarded
//! without touching notifications, navigation, or state.
//!
//! The in-flight slot is held by a guard. If the `submit` future is dropped
//! before the client answers (an aborted task, a timeout), the guard returns
//! the controller to `Idle` and dismisses the loading notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use portico_core::logging::submission_span;
use portico_core::{PorticoError, PorticoResult, Settings, SETTINGS};
use portico_forms::signup::signup_form;
use portico_forms::{field_props, FieldErrors, FieldEvent, FieldProps, FormSpec, FormState, SignUpValues};
use tracing::{debug, info, warn, Instrument};

use crate::client::{SignUpClient, SignUpRequest};
use crate::messages::{Notification, Notifier};
use crate::navigation::Navigator;

/// Where a submission is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing in progress.
    Idle,
    /// Submit-time validation is running.
    Validating,
    /// Waiting for the sign-up client.
    Submitting,
    /// The account was created.
    Succeeded,
    /// The sign-up client failed with the given reason.
    Failed(String),
}

impl SubmissionStatus {
    /// Returns `true` while a submission is validating or waiting.
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

/// What a call to [`SubmissionController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in progress, or the form is gone.
    Ignored,
    /// Validation failed; the client was not called.
    Invalid(FieldErrors),
    /// The account was created and the user was sent to the index route.
    Succeeded,
    /// The client failed with the given reason.
    Failed(String),
    /// The client finished after the form unmounted; the result was dropped.
    Discarded,
}

/// The submit event of the form element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    /// Creates a fresh event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the browser's own form submission.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` once [`prevent_default`](Self::prevent_default) ran.
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug)]
struct Inner {
    form_state: FormState,
    status: SubmissionStatus,
    history: Vec<SubmissionStatus>,
}

impl Inner {
    fn transition(&mut self, next: SubmissionStatus) {
        debug!(from = ?self.status, to = ?next, "submission status changed");
        self.history.push(next.clone());
        self.status = next;
    }
}

/// Drives the sign-up form from first keystroke to account creation.
pub struct SubmissionController {
    form: FormSpec,
    inner: Mutex<Inner>,
    mounted: AtomicBool,
    client: Arc<dyn SignUpClient>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: Settings,
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("form", &self.form.name())
            .field("status", &self.status())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

impl SubmissionController {
    /// Mounts `form` with the given collaborators and the global settings.
    pub fn new(
        form: FormSpec,
        client: Arc<dyn SignUpClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let form_state = FormState::new(&form);
        Self {
            form,
            inner: Mutex::new(Inner {
                form_state,
                status: SubmissionStatus::Idle,
                history: vec![SubmissionStatus::Idle],
            }),
            mounted: AtomicBool::new(true),
            client,
            notifier,
            navigator,
            settings: SETTINGS.get_or_default().clone(),
        }
    }

    /// Mounts the sign-up form.
    pub fn signup(
        client: Arc<dyn SignUpClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> PorticoResult<Self> {
        Ok(Self::new(signup_form()?, client, notifier, navigator))
    }

    /// Replaces the settings used for routes and notifications.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the mounted form.
    pub const fn form(&self) -> &FormSpec {
        &self.form
    }

    /// Forwards a field event to the form state. See [`FormState::apply`].
    pub fn apply(&self, event: FieldEvent) -> Vec<String> {
        self.lock().form_state.apply(&self.form, event)
    }

    /// Returns render props for every field.
    pub fn field_props(&self) -> Vec<FieldProps> {
        field_props(&self.form, &self.lock().form_state)
    }

    /// Returns the current raw value of `field`.
    pub fn value(&self, field: &str) -> String {
        self.lock().form_state.value(field).to_string()
    }

    /// Returns the current submission status.
    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    /// Returns every status the controller has been in, oldest first.
    pub fn history(&self) -> Vec<SubmissionStatus> {
        self.lock().history.clone()
    }

    /// Returns `false` once [`unmount`](Self::unmount) ran.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Marks the form as gone. A client call still in flight will have its
    /// result discarded.
    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            debug!(form = self.form.name(), "form unmounted");
        }
    }

    /// Handles the form element's submit event: suppresses the default
    /// action, then submits.
    pub async fn handle_submit_event(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();
        self.submit().await
    }

    /// Validates the form and, if it is valid, calls the sign-up client.
    pub async fn submit(&self) -> SubmitOutcome {
        let span = submission_span(&self.settings.routes.sign_up);
        self.run_submission().instrument(span).await
    }

    async fn run_submission(&self) -> SubmitOutcome {
        if !self.is_mounted() {
            debug!("submit after unmount ignored");
            return SubmitOutcome::Ignored;
        }

        let (slot, request) = match self.begin() {
            Ok(claimed) => claimed,
            Err(outcome) => return outcome,
        };

        let key = self.settings.routes.sign_up.as_str();
        let notifications = &self.settings.notifications;
        self.notifier
            .notify(Notification::loading(key, notifications.loading_content.as_str()));

        let result = self.client.sign_up(&request).await;
        slot.complete();

        if !self.is_mounted() {
            debug!(ok = result.is_ok(), reason = %PorticoError::StaleCompletion, "discarding completion");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                {
                    let mut inner = self.lock();
                    inner.transition(SubmissionStatus::Succeeded);
                    inner.transition(SubmissionStatus::Idle);
                }
                info!("sign-up succeeded");
                self.notifier.notify(Notification::success(
                    key,
                    notifications.success_content.as_str(),
                    notifications.transient_duration(),
                ));
                self.navigator.navigate(&self.settings.routes.index);
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                {
                    let mut inner = self.lock();
                    inner.transition(SubmissionStatus::Failed(err.message.clone()));
                    inner.transition(SubmissionStatus::Idle);
                }
                info!(reason = %err.message, "sign-up failed");
                self.notifier.notify(Notification::error(
                    key,
                    err.message.as_str(),
                    notifications.transient_duration(),
                ));
                SubmitOutcome::Failed(err.message)
            }
        }
    }

    /// Claims the single submission slot and validates. Returns the claimed
    /// slot with the request to send, or the outcome to report without
    /// calling the client.
    fn begin(&self) -> Result<(InFlight<'_>, SignUpRequest), SubmitOutcome> {
        let mut inner = self.lock();
        if inner.status.is_in_flight() {
            debug!(status = ?inner.status, "submission already in progress; dropping submit");
            return Err(SubmitOutcome::Ignored);
        }

        inner.transition(SubmissionStatus::Validating);
        let cleaned = match inner.form_state.validate_all(&self.form) {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                info!(fields = errors.len(), "sign-up form invalid");
                inner.transition(SubmissionStatus::Idle);
                return Err(SubmitOutcome::Invalid(errors));
            }
        };

        match SignUpValues::try_from(&cleaned) {
            Ok(values) => {
                inner.transition(SubmissionStatus::Submitting);
                Ok((InFlight::claim(self), SignUpRequest::from(values)))
            }
            Err(err) => {
                warn!(error = %err, form = self.form.name(), "form does not produce sign-up values");
                inner.transition(SubmissionStatus::Idle);
                Err(SubmitOutcome::Invalid(FieldErrors::new()))
            }
        }
    }
}

/// The claimed submission slot while the client call is pending.
///
/// Dropping it before [`complete`](Self::complete) means the submit future
/// was cancelled: a mounted controller goes back to `Idle` and its loading
/// notification is dismissed.
struct InFlight<'a> {
    controller: &'a SubmissionController,
    armed: bool,
}

impl<'a> InFlight<'a> {
    const fn claim(controller: &'a SubmissionController) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    /// The client answered; the caller owns the remaining transitions.
    fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed || !self.controller.is_mounted() {
            return;
        }
        {
            let mut inner = self.controller.lock();
            if inner.status != SubmissionStatus::Submitting {
                return;
            }
            inner.transition(SubmissionStatus::Idle);
        }
        warn!("submission cancelled before the sign-up client answered");
        self.controller
            .notifier
            .dismiss(&self.controller.settings.routes.sign_up);
    }
}
