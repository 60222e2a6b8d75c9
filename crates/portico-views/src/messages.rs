//! Keyed notifications.
//!
//! A notification with the same key as one already on screen replaces it, so
//! the loading notice of a submission turns into its success or error notice
//! in place. A zero duration means the notification stays until replaced.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Work in progress.
    Loading,
    /// The work succeeded.
    Success,
    /// The work failed.
    Error,
}

impl NotificationKind {
    /// Returns the CSS tag for this kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Kind.
    pub kind: NotificationKind,
    /// Replacement key.
    pub key: String,
    /// Text shown to the user.
    pub content: String,
    /// How long the notification stays; zero keeps it until replaced.
    pub duration: Duration,
}

impl Notification {
    /// A persistent loading notification.
    pub fn loading(key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Loading,
            key: key.into(),
            content: content.into(),
            duration: Duration::ZERO,
        }
    }

    /// A success notification shown for `duration`.
    pub fn success(key: impl Into<String>, content: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::Success,
            key: key.into(),
            content: content.into(),
            duration,
        }
    }

    /// An error notification shown for `duration`.
    pub fn error(key: impl Into<String>, content: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::Error,
            key: key.into(),
            content: content.into(),
            duration,
        }
    }

    /// Returns `true` if the notification stays until replaced.
    pub fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    /// Shows `notification`, replacing any notification with the same key.
    fn notify(&self, notification: Notification);

    /// Removes the notification shown under `key`, if any.
    fn dismiss(&self, key: &str) {
        let _ = key;
    }
}
