//! Test doubles for the injectable collaborators.
//!
//! These make retry behavior fully deterministic in tests: delays are
//! recorded instead of slept, jitter samples are pinned, and log messages
//! are collected for assertion. Exact delay sequences can be asserted
//! without any wall-clock waiting.
//!
//! # Examples
//!
//! ```rust
//! use ebbtide::testing::{CollectingLogger, FixedRandom, RecordingSleeper};
//! use ebbtide::{Operation, Retrier, RetryPolicy};
//! use std::time::Duration;
//!
//! let retrier = Retrier::new(
//!     RetryPolicy::exponential(Duration::from_secs(1))
//!         .with_max_retries(2)
//!         .with_jitter(false),
//! )
//! .unwrap()
//! .with_sleeper(RecordingSleeper::new())
//! .with_random(FixedRandom::new(0.0))
//! .with_logger(CollectingLogger::new());
//!
//! let _ = retrier.execute(Operation::new("always fails", || Err::<(), _>("boom")));
//! ```

use std::sync::Mutex;
use std::time::Duration;

use crate::logger::RetryLogger;
use crate::rng::RandomSource;
use crate::sleep::Sleeper;

/// A sleeper that records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Create an empty recording sleeper.
    pub fn new() -> Self {
        Self::default()
    }

    /// The delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("sleeper lock poisoned").clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
    }
}

/// A random source that always returns the same unit sample.
///
/// `FixedRandom::new(0.0)` pins the jitter factor at exactly 0.5, which
/// keeps jittered delays on clean boundaries for assertion.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    unit: f64,
}

impl FixedRandom {
    /// Create a source pinned to `unit`, which must lie in `[0, 1)`.
    pub fn new(unit: f64) -> Self {
        debug_assert!((0.0..1.0).contains(&unit));
        Self { unit }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.unit
    }
}

/// A logger that collects messages for later assertion.
#[derive(Debug, Default)]
pub struct CollectingLogger {
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl CollectingLogger {
    /// Create an empty collecting logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warning messages collected so far, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("logger lock poisoned").clone()
    }

    /// Error messages collected so far, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("logger lock poisoned").clone()
    }
}

impl RetryLogger for CollectingLogger {
    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("logger lock poisoned")
            .push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors
            .lock()
            .expect("logger lock poisoned")
            .push(message.to_string());
    }
}
