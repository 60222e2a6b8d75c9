//! A sign-up client with scripted responses.
//!
//! [`ScriptedSignUpClient`] answers calls from a queue of responses, falling
//! back to a default once the queue is empty. It records every request, and
//! it can be put on hold so that calls stay in flight until the test releases
//! them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use portico_test::ScriptedSignUpClient;
//!
//! # async fn example() {
//! let client = Arc::new(ScriptedSignUpClient::new().then_fail("Email already in use"));
//! client.hold();
//! // ... start a submission in another task ...
//! client.wait_for_calls(1).await;
//! client.release();
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use portico_views::{SignUpClient, SignUpError, SignUpRequest};
use tokio::sync::watch;

/// A sign-up client for tests.
#[derive(Debug)]
pub struct ScriptedSignUpClient {
    requests: Mutex<Vec<SignUpRequest>>,
    script: Mutex<VecDeque<Result<(), SignUpError>>>,
    fallback: Result<(), SignUpError>,
    held: watch::Sender<bool>,
    calls: watch::Sender<usize>,
}

impl Default for ScriptedSignUpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSignUpClient {
    /// A client that accepts every request.
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(()),
            held: watch::channel(false).0,
            calls: watch::channel(0).0,
        }
    }

    /// A client that rejects every request with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: Err(SignUpError::new(message)),
            ..Self::new()
        }
    }

    /// Queues a success for the next unscripted call.
    #[must_use]
    pub fn then_succeed(self) -> Self {
        self.script.lock().expect("script lock poisoned").push_back(Ok(()));
        self
    }

    /// Queues a failure with `message` for the next unscripted call.
    #[must_use]
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(SignUpError::new(message)));
        self
    }

    /// Keeps every call, current and future, in flight until [`release`](Self::release).
    pub fn hold(&self) {
        self.held.send_replace(true);
    }

    /// Lets held calls finish.
    pub fn release(&self) {
        self.held.send_replace(false);
    }

    /// Returns the number of calls received so far.
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }

    /// Waits until at least `n` calls have been received.
    pub async fn wait_for_calls(&self, n: usize) {
        let mut calls = self.calls.subscribe();
        let reached = calls.wait_for(|count| *count >= n).await.is_ok();
        assert!(reached, "call counter closed before reaching {n}");
    }

    /// Returns every request received, in order.
    pub fn requests(&self) -> Vec<SignUpRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    /// Returns the last request received.
    pub fn last_request(&self) -> Option<SignUpRequest> {
        self.requests.lock().expect("requests lock poisoned").last().cloned()
    }

    /// Asserts that exactly `expected` calls were made.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_calls(&self, expected: usize) {
        let actual = self.calls();
        assert_eq!(actual, expected, "Expected {expected} sign-up call(s), but {actual} were made");
    }
}

#[async_trait]
impl SignUpClient for ScriptedSignUpClient {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), SignUpError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.clone());
        self.calls.send_modify(|count| *count += 1);

        let mut held = self.held.subscribe();
        let released = held.wait_for(|on_hold| !*on_hold).await.is_ok();
        assert!(released, "hold switch closed while a call was in flight");

        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
