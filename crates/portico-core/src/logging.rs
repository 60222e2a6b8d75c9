//! Logging integration for portico.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`] and for creating spans around submissions and resolver calls.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise a structured JSON format is used.
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form submission.
///
/// `key` is the stable notification key of the submission.
///
/// # Examples
///
/// ```
/// use portico_core::logging::submission_span;
///
/// let span = submission_span("/signup");
/// let _guard = span.enter();
/// tracing::info!("submitting");
/// ```
pub fn submission_span(key: &str) -> tracing::Span {
    tracing::info_span!("submission", key = key)
}

/// Creates a tracing span for one resolver execution.
pub fn resolver_span(field: &str) -> tracing::Span {
    tracing::info_span!("resolver", field = field)
}
