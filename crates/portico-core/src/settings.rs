//! Settings for portico.
//!
//! [`Settings`] holds everything the form engine, the submission controller,
//! and logging read at runtime. [`LazySettings`] is a globally-accessible,
//! set-once container for it.

use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PorticoError;

/// Application routes the sign-up flow knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Landing page; the destination after a successful sign-up.
    pub index: String,
    /// The sign-up page. Also used as the notification key for submissions.
    pub sign_up: String,
    /// The sign-in page linked from the sign-up form.
    pub sign_in: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            index: "/".to_string(),
            sign_up: "/signup".to_string(),
            sign_in: "/signin".to_string(),
        }
    }
}

/// Content and timing of the notifications emitted during a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Text of the persistent loading notification.
    pub loading_content: String,
    /// Text of the success notification.
    pub success_content: String,
    /// How long success and error notifications stay visible, in milliseconds.
    pub transient_duration_ms: u64,
}

impl NotificationSettings {
    /// Returns the transient duration as a [`Duration`].
    pub const fn transient_duration(&self) -> Duration {
        Duration::from_millis(self.transient_duration_ms)
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            loading_content: "Loading ...".to_string(),
            success_content: "Success!".to_string(),
            transient_duration_ms: 2_000,
        }
    }
}

/// The complete set of portico settings.
///
/// # Examples
///
/// ```
/// use portico_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.routes.index, "/");
/// assert_eq!(settings.password_min_length, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects pretty over JSON log output.
    pub debug: bool,
    /// The log filter directive (e.g. "info", "portico_views=debug").
    pub log_level: String,
    /// Routes used for navigation and notification keys.
    pub routes: RouteSettings,
    /// Submission notification content.
    pub notifications: NotificationSettings,
    /// Minimum password length enforced by the sign-up form.
    pub password_min_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            routes: RouteSettings::default(),
            notifications: NotificationSettings::default(),
            password_min_length: 6,
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup. Code that
/// may run before that uses [`get_or_default`](LazySettings::get_or_default).
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Configures the global settings, failing instead of panicking when
    /// they were already set.
    pub fn try_configure(&self, settings: Settings) -> Result<&Settings, PorticoError> {
        self.inner
            .set(settings)
            .map_err(|_| PorticoError::Configuration("Settings have already been configured".to_string()))?;
        Ok(self.get())
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, installing the defaults if nothing
    /// was configured yet.
    pub fn get_or_default(&self) -> &Settings {
        self.inner.get_or_init(Settings::default)
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.password_min_length, 6);
    }

    #[test]
    fn test_default_routes() {
        let routes = RouteSettings::default();
        assert_eq!(routes.index, "/");
        assert_eq!(routes.sign_up, "/signup");
        assert_eq!(routes.sign_in, "/signin");
    }

    #[test]
    fn test_default_notifications() {
        let n = NotificationSettings::default();
        assert_eq!(n.loading_content, "Loading ...");
        assert_eq!(n.success_content, "Success!");
        assert_eq!(n.transient_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());

        let mut settings = Settings::default();
        settings.debug = false;
        settings.password_min_length = 10;

        lazy.configure(settings);
        assert!(lazy.is_configured());
        assert!(!lazy.get().debug);
        assert_eq!(lazy.get().password_min_length, 10);
    }

    #[test]
    fn test_lazy_settings_try_configure_twice() {
        let lazy = LazySettings::new();
        assert_eq!(lazy.try_configure(Settings::default()).unwrap().log_level, "info");
        let err = lazy.try_configure(Settings::default()).unwrap_err();
        assert!(matches!(err, PorticoError::Configuration(_)));
    }

    #[test]
    fn test_lazy_settings_get_or_default() {
        let lazy = LazySettings::new();
        assert_eq!(lazy.get_or_default(), &Settings::default());
        assert!(lazy.is_configured());
    }

    #[test]
    #[should_panic(expected = "already been configured")]
    fn test_lazy_settings_double_configure_panics() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default());
        lazy.configure(Settings::default());
    }

    #[test]
    #[should_panic(expected = "not been configured")]
    fn test_lazy_settings_get_before_configure_panics() {
        let lazy = LazySettings::new();
        let _ = lazy.get();
    }
}
