//! Failure logging for retry sequences.
//!
//! The executor emits a warning before every retry and an error on
//! exhaustion. Those messages are produced whether or not a logger was wired
//! in: when nothing is supplied, [`StdoutLogger`] writes them as plain text
//! instead of discarding them. The `tracing` feature adds a
//! [`TracingLogger`] that routes the same messages through `tracing` events.

/// Capability for reporting retry failures.
///
/// Both operations are fire-and-forget writes: no return value, and they
/// must not panic. Implementations shared across threads must tolerate
/// concurrent writes.
pub trait RetryLogger {
    /// Report a transient failure that will be retried.
    fn warn(&self, message: &str);
    /// Report a terminal failure.
    fn error(&self, message: &str);
}

impl<L: RetryLogger + ?Sized> RetryLogger for &L {
    fn warn(&self, message: &str) {
        (**self).warn(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

/// Fallback plain-text sink writing to standard output.
///
/// Selected at construction when no other logger is supplied, so retry
/// diagnostics are never silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLogger;

impl RetryLogger for StdoutLogger {
    fn warn(&self, message: &str) {
        println!("warning: {}", message);
    }

    fn error(&self, message: &str) {
        println!("error: {}", message);
    }
}

/// Logger routing messages through `tracing` events.
///
/// Only available with the `tracing` feature.
///
/// # Examples
///
/// ```rust,ignore
/// use ebbtide::{Retrier, RetryPolicy, TracingLogger};
/// use std::time::Duration;
///
/// let retrier = Retrier::new(RetryPolicy::exponential(Duration::from_millis(100)))?
///     .with_logger(TracingLogger);
/// ```
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl RetryLogger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "ebbtide", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ebbtide", "{}", message);
    }
}
