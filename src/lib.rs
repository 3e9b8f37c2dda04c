//! # Ebbtide
//!
//! > *"The tide goes out; the tide comes back."*
//!
//! A small Rust library for bounded retry with exponential backoff and
//! jitter.
//!
//! ## Philosophy
//!
//! **Ebbtide** embodies the principle of **pure core, injectable shell**:
//! - **Ebb** = The policy (pure data: attempts, delays, jitter - no side effects)
//! - **Tide** = The executor (re-invoking the operation, sleeping, logging)
//!
//! Everything that touches the outside world - sleeping, randomness,
//! logging - sits behind a small trait with a default implementation, so
//! retry behavior is exactly testable without wall-clock waiting.
//!
//! ## Quick Example
//!
//! ```rust
//! use ebbtide::{Operation, Retrier, RetryPolicy};
//! use std::time::Duration;
//!
//! let retrier = Retrier::new(
//!     RetryPolicy::exponential(Duration::from_millis(10))
//!         .with_max_retries(3)
//!         .with_jitter(false),
//! )
//! .unwrap();
//!
//! let mut calls = 0;
//! let outcome = retrier.execute(Operation::new("flaky lookup", || {
//!     calls += 1;
//!     if calls < 2 {
//!         Err("transient failure")
//!     } else {
//!         Ok(42)
//!     }
//! }));
//!
//! assert_eq!(outcome.ok(), Some(42));
//! ```
//!
//! Failures rejected by a classifier are propagated immediately with no
//! delay; see [`Retrier::execute_if`]. All permitted attempts failing
//! surfaces the final error as [`RetryOutcome::Exhausted`] - terminal
//! failures are never swallowed.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod executor;
pub mod logger;
pub mod outcome;
pub mod policy;
pub mod rng;
pub mod sleep;
pub mod testing;
#[cfg(feature = "tickers")]
pub mod tickers;

// Re-exports
pub use executor::{Operation, Retrier};
pub use logger::{RetryLogger, StdoutLogger};
#[cfg(feature = "tracing")]
pub use logger::TracingLogger;
pub use outcome::{RetryError, RetryExhausted, RetryOutcome};
pub use policy::{PolicyError, RetryPolicy};
pub use rng::{RandomSource, ThreadRandom};
pub use sleep::{Sleeper, ThreadSleeper};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::executor::{Operation, Retrier};
    pub use crate::logger::{RetryLogger, StdoutLogger};
    #[cfg(feature = "tracing")]
    pub use crate::logger::TracingLogger;
    pub use crate::outcome::{RetryError, RetryExhausted, RetryOutcome};
    pub use crate::policy::{PolicyError, RetryPolicy};
    pub use crate::rng::{RandomSource, ThreadRandom};
    pub use crate::sleep::{Sleeper, ThreadSleeper};
}
