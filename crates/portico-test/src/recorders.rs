//! Recording notifier and navigator.
//!
//! Both capture every call in an `Arc<Mutex<_>>` so they can be cloned
//! into the controller and inspected from the test afterwards.
//!
//! ```
//! use portico_test::recorders::RecordingNotifier;
//! use portico_views::{Notification, Notifier};
//!
//! let notifier = RecordingNotifier::new();
//! notifier.notify(Notification::loading("/signup", "Loading ..."));
//! notifier.assert_count(1);
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use portico_views::{Navigator, Notification, NotificationKind, Notifier};

/// A notifier that records every notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    store: Arc<Mutex<Vec<Notification>>>,
    screen: Arc<Mutex<BTreeMap<String, Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification in the order shown.
    pub fn notifications(&self) -> Vec<Notification> {
        self.store.lock().expect("RecordingNotifier lock poisoned").clone()
    }

    /// Returns the notifications of `kind`.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Returns what is on screen: the latest undismissed notification per key.
    pub fn visible(&self) -> BTreeMap<String, Notification> {
        self.screen.lock().expect("RecordingNotifier lock poisoned").clone()
    }

    /// Returns the number of notifications.
    pub fn len(&self) -> usize {
        self.store.lock().expect("RecordingNotifier lock poisoned").len()
    }

    /// Returns `true` if nothing was shown.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every recorded notification.
    pub fn clear(&self) {
        self.store.lock().expect("RecordingNotifier lock poisoned").clear();
        self.screen.lock().expect("RecordingNotifier lock poisoned").clear();
    }

    /// Asserts that exactly `expected` notifications were shown.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, expected: usize) {
        let actual = self.len();
        assert_eq!(actual, expected, "Expected {expected} notification(s), but {actual} were shown");
    }

    /// Asserts the kinds and contents of every notification, in order.
    ///
    /// # Panics
    ///
    /// Panics if the sequence differs.
    pub fn assert_sequence(&self, expected: &[(NotificationKind, &str)]) {
        let actual: Vec<(NotificationKind, String)> = self
            .notifications()
            .into_iter()
            .map(|n| (n.kind, n.content))
            .collect();
        let expected: Vec<(NotificationKind, String)> =
            expected.iter().map(|(k, c)| (*k, (*c).to_string())).collect();
        assert_eq!(actual, expected, "Unexpected notification sequence");
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.screen
            .lock()
            .expect("RecordingNotifier lock poisoned")
            .insert(notification.key.clone(), notification.clone());
        self.store
            .lock()
            .expect("RecordingNotifier lock poisoned")
            .push(notification);
    }

    fn dismiss(&self, key: &str) {
        self.screen
            .lock()
            .expect("RecordingNotifier lock poisoned")
            .remove(key);
    }
}

/// A navigator that records every route change.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    store: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every route navigated to, in order.
    pub fn routes(&self) -> Vec<String> {
        self.store.lock().expect("RecordingNavigator lock poisoned").clone()
    }

    /// Returns the last route navigated to.
    pub fn last_route(&self) -> Option<String> {
        self.store
            .lock()
            .expect("RecordingNavigator lock poisoned")
            .last()
            .cloned()
    }

    /// Asserts that no navigation happened.
    ///
    /// # Panics
    ///
    /// Panics if any route was recorded.
    pub fn assert_not_navigated(&self) {
        let routes = self.routes();
        assert!(routes.is_empty(), "Expected no navigation, but got {routes:?}");
    }

    /// Asserts exactly one navigation, to `route`.
    ///
    /// # Panics
    ///
    /// Panics otherwise.
    pub fn assert_navigated_once_to(&self, route: &str) {
        let routes = self.routes();
        assert_eq!(routes, [route], "Expected a single navigation to {route}");
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.store
            .lock()
            .expect("RecordingNavigator lock poisoned")
            .push(route.to_string());
    }
}
