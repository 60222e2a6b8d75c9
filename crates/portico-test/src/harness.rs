//! A mounted sign-up screen with recording collaborators.

use std::sync::Arc;

use portico_core::{PorticoResult, Settings};
use portico_forms::signup::{signup_form_with_min_length, CONFIRM, EMAIL, PASSWORD, USERNAME};
use portico_forms::FieldEvent;
use portico_views::SubmissionController;

use crate::recorders::{RecordingNavigator, RecordingNotifier};
use crate::scripted_client::ScriptedSignUpClient;

/// Values typed into the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpFixture {
    /// Personal name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm: String,
}

impl SignUpFixture {
    /// A complete, valid sign-up.
    pub fn jane_doe() -> Self {
        Self {
            username: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            password: "secret1".to_string(),
            confirm: "secret1".to_string(),
        }
    }

    /// Returns a copy with `confirm` replaced.
    #[must_use]
    pub fn with_confirm(mut self, confirm: impl Into<String>) -> Self {
        self.confirm = confirm.into();
        self
    }

    /// Returns a copy with `email` replaced.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (USERNAME, self.username.as_str()),
            (EMAIL, self.email.as_str()),
            (PASSWORD, self.password.as_str()),
            (CONFIRM, self.confirm.as_str()),
        ]
    }
}

/// A sign-up controller wired to a scripted client and recorders.
#[derive(Debug, Clone)]
pub struct SignUpHarness {
    /// The controller under test.
    pub controller: Arc<SubmissionController>,
    /// The sign-up client it calls.
    pub client: Arc<ScriptedSignUpClient>,
    /// Every notification it showed.
    pub notifier: RecordingNotifier,
    /// Every route it navigated to.
    pub navigator: RecordingNavigator,
}

impl SignUpHarness {
    /// Mounts the sign-up form against `client` with default settings.
    pub fn new(client: ScriptedSignUpClient) -> PorticoResult<Self> {
        Self::with_settings(client, Settings::default())
    }

    /// Mounts the sign-up form against `client` with `settings`.
    pub fn with_settings(client: ScriptedSignUpClient, settings: Settings) -> PorticoResult<Self> {
        let client = Arc::new(client);
        let notifier = RecordingNotifier::new();
        let navigator = RecordingNavigator::new();
        let form = signup_form_with_min_length(settings.password_min_length)?;
        let controller = SubmissionController::new(
            form,
            client.clone(),
            Arc::new(notifier.clone()),
            Arc::new(navigator.clone()),
        )
        .with_settings(settings);

        Ok(Self {
            controller: Arc::new(controller),
            client,
            notifier,
            navigator,
        })
    }

    /// Types each value of `fixture` into its field and leaves the field.
    pub fn fill(&self, fixture: &SignUpFixture) {
        for (field, value) in fixture.pairs() {
            self.controller.apply(FieldEvent::change(field, value));
            self.controller.apply(FieldEvent::blur(field));
        }
    }
}
