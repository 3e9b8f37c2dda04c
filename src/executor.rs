//! The retry executor.
//!
//! [`Retrier`] re-invokes a fallible [`Operation`] under an
//! exponential-backoff-with-jitter [`RetryPolicy`], blocking the calling
//! thread between attempts. Randomness, sleeping, and logging are injected
//! capabilities with sensible defaults, so tests can pin exact delay
//! sequences without wall-clock waiting.

use std::fmt::Display;

use crate::logger::{RetryLogger, StdoutLogger};
use crate::outcome::{RetryExhausted, RetryOutcome};
use crate::policy::{PolicyError, RetryPolicy};
use crate::rng::{RandomSource, ThreadRandom};
use crate::sleep::{Sleeper, ThreadSleeper};

/// A fallible operation paired with a human-readable label.
///
/// The label identifies the operation in log messages; there is no runtime
/// introspection of the closure. The closure is `FnMut` because each retry
/// re-invokes it from scratch - it must be safe to call repeatedly. The
/// executor makes no attempt to detect non-idempotent side effects on
/// retries; that responsibility belongs to the caller.
///
/// # Examples
///
/// ```rust
/// use ebbtide::Operation;
///
/// let op = Operation::new("fetch page", || Ok::<_, String>("body"));
/// assert_eq!(op.label(), "fetch page");
/// ```
pub struct Operation<F> {
    label: String,
    f: F,
}

impl<F> Operation<F> {
    /// Pair a closure with the label used in log messages.
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }

    /// The human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<F> std::fmt::Debug for Operation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("label", &self.label)
            .field("f", &"<closure>")
            .finish()
    }
}

/// Executes operations under a retry policy.
///
/// A `Retrier` owns a validated policy plus three collaborators: a
/// [`Sleeper`] for the backoff waits, a [`RandomSource`] for jitter, and a
/// [`RetryLogger`] for failure reporting. Defaults are chosen at
/// construction (thread sleep, thread-local randomness, stdout logging) and
/// swapped with the `with_*` builders.
///
/// Execution is synchronous: [`execute`](Retrier::execute) blocks the
/// calling thread for the full duration of all attempts and all
/// inter-attempt delays, and spawns nothing. Each call owns its attempt
/// state exclusively, so a shared `Retrier` may be used from several threads
/// at once as long as its collaborators tolerate concurrent use.
///
/// # Examples
///
/// ```rust
/// use ebbtide::{Operation, Retrier, RetryPolicy};
/// use std::time::Duration;
///
/// let retrier = Retrier::new(
///     RetryPolicy::exponential(Duration::from_millis(10))
///         .with_max_retries(3)
///         .with_jitter(false),
/// )
/// .unwrap();
///
/// let mut calls = 0;
/// let outcome = retrier.execute(Operation::new("flaky", || -> Result<i32, String> {
///     calls += 1;
///     if calls < 3 {
///         Err("transient".to_string())
///     } else {
///         Ok(42)
///     }
/// }));
///
/// assert_eq!(outcome.ok(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct Retrier<S = ThreadSleeper, R = ThreadRandom, L = StdoutLogger> {
    policy: RetryPolicy,
    sleeper: S,
    random: R,
    logger: L,
}

impl Retrier {
    /// Build a retrier with default collaborators.
    ///
    /// Validates the policy's construction invariants once, here - never per
    /// retry.
    pub fn new(policy: RetryPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            policy,
            sleeper: ThreadSleeper,
            random: ThreadRandom,
            logger: StdoutLogger,
        })
    }
}

impl<S, R, L> Retrier<S, R, L> {
    /// Swap in a different sleeper.
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Retrier<S2, R, L> {
        Retrier {
            policy: self.policy,
            sleeper,
            random: self.random,
            logger: self.logger,
        }
    }

    /// Swap in a different random source.
    pub fn with_random<R2>(self, random: R2) -> Retrier<S, R2, L> {
        Retrier {
            policy: self.policy,
            sleeper: self.sleeper,
            random,
            logger: self.logger,
        }
    }

    /// Swap in a different logger.
    pub fn with_logger<L2>(self, logger: L2) -> Retrier<S, R, L2> {
        Retrier {
            policy: self.policy,
            sleeper: self.sleeper,
            random: self.random,
            logger,
        }
    }

    /// The policy this retrier executes under.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<S, R, L> Retrier<S, R, L>
where
    S: Sleeper,
    R: RandomSource,
    L: RetryLogger,
{
    /// Execute an operation, retrying every failure.
    ///
    /// Equivalent to [`execute_if`](Retrier::execute_if) with a classifier
    /// that accepts everything.
    pub fn execute<T, E, F>(&self, operation: Operation<F>) -> RetryOutcome<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        self.execute_if(operation, |_| true)
    }

    /// Execute an operation, retrying only failures the classifier accepts.
    ///
    /// The first success short-circuits with the operation's own value and
    /// no further sleeps or logs. A failure rejected by the classifier
    /// returns [`RetryOutcome::NonRetryable`] immediately, with no delay.
    /// A retryable failure on the final permitted attempt is logged at error
    /// severity and returned as [`RetryOutcome::Exhausted`]; any earlier
    /// retryable failure is logged at warning severity along with the
    /// backoff delay about to be applied, then absorbed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ebbtide::{Operation, Retrier, RetryPolicy};
    /// use std::time::Duration;
    ///
    /// #[derive(Debug)]
    /// enum FetchError {
    ///     Timeout,
    ///     Forbidden,
    /// }
    ///
    /// impl std::fmt::Display for FetchError {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "{:?}", self)
    ///     }
    /// }
    ///
    /// let retrier =
    ///     Retrier::new(RetryPolicy::exponential(Duration::from_millis(10))).unwrap();
    ///
    /// let outcome = retrier.execute_if(
    ///     Operation::new("fetch", || Err::<(), _>(FetchError::Forbidden)),
    ///     |e| matches!(e, FetchError::Timeout),
    /// );
    ///
    /// // Forbidden is not retryable: one invocation, no delay.
    /// assert!(outcome.is_non_retryable());
    /// ```
    pub fn execute_if<T, E, F, P>(
        &self,
        mut operation: Operation<F>,
        classifier: P,
    ) -> RetryOutcome<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt: u32 = 0;
        loop {
            match (operation.f)() {
                Ok(value) => return RetryOutcome::Success(value),
                Err(error) => {
                    if !classifier(&error) {
                        return RetryOutcome::NonRetryable(error);
                    }

                    if attempt == self.policy.max_retries() {
                        self.logger.error(&format!(
                            "max retries reached: '{}' failed after {} attempts: {}",
                            operation.label,
                            attempt + 1,
                            error
                        ));
                        return RetryOutcome::Exhausted(RetryExhausted::new(error, attempt + 1));
                    }

                    let raw = self.policy.raw_delay_for_attempt(attempt);
                    let delay = self.policy.jittered(raw, self.random.next_unit());
                    self.logger.warn(&format!(
                        "attempt {} of '{}' failed: {}; retrying in {:.2?}",
                        attempt + 1,
                        operation.label,
                        error,
                        delay
                    ));
                    self.sleeper.sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod executor_tests {
    use super::*;
    use crate::testing::{CollectingLogger, FixedRandom, RecordingSleeper};
    use std::time::Duration;

    fn test_retrier(
        policy: RetryPolicy,
    ) -> Retrier<RecordingSleeper, FixedRandom, CollectingLogger> {
        Retrier::new(policy)
            .unwrap()
            .with_sleeper(RecordingSleeper::new())
            .with_random(FixedRandom::new(0.0))
            .with_logger(CollectingLogger::new())
    }

    #[test]
    fn test_success_on_first_attempt_never_sleeps_or_logs() {
        let retrier = test_retrier(RetryPolicy::exponential(Duration::from_secs(1)));

        let outcome = retrier.execute(Operation::new("ok", || Ok::<_, String>(7)));

        assert_eq!(outcome.ok(), Some(7));
        assert!(retrier.sleeper.delays().is_empty());
        assert!(retrier.logger.warnings().is_empty());
        assert!(retrier.logger.errors().is_empty());
    }

    #[test]
    fn test_invocation_count_on_exhaustion() {
        let retrier = test_retrier(
            RetryPolicy::exponential(Duration::from_secs(1))
                .with_max_retries(3)
                .with_jitter(false),
        );

        let mut calls = 0u32;
        let outcome = retrier.execute(Operation::new("always fails", || {
            calls += 1;
            Err::<(), _>("boom")
        }));

        assert_eq!(calls, 4);
        match outcome {
            RetryOutcome::Exhausted(e) => {
                assert_eq!(e.attempts, 4);
                assert_eq!(e.final_error, "boom");
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_max_retries_logs_error_not_warning() {
        let retrier = test_retrier(
            RetryPolicy::exponential(Duration::from_secs(1)).with_max_retries(0),
        );

        let mut calls = 0u32;
        let outcome = retrier.execute(Operation::new("one shot", || {
            calls += 1;
            Err::<(), _>("boom")
        }));

        assert_eq!(calls, 1);
        assert!(outcome.is_exhausted());
        assert!(retrier.sleeper.delays().is_empty());
        assert!(retrier.logger.warnings().is_empty());
        assert_eq!(retrier.logger.errors().len(), 1);
        assert!(retrier.logger.errors()[0].contains("one shot"));
        assert!(retrier.logger.errors()[0].contains("boom"));
    }

    #[test]
    fn test_classifier_rejection_short_circuits() {
        let retrier = test_retrier(RetryPolicy::exponential(Duration::from_secs(1)));

        let mut calls = 0u32;
        let outcome = retrier.execute_if(
            Operation::new("permanent", || {
                calls += 1;
                Err::<(), _>("fatal")
            }),
            |_| false,
        );

        assert_eq!(calls, 1);
        assert_eq!(outcome, RetryOutcome::NonRetryable("fatal"));
        assert!(retrier.sleeper.delays().is_empty());
        assert!(retrier.logger.warnings().is_empty());
        assert!(retrier.logger.errors().is_empty());
    }

    #[test]
    fn test_warning_logged_per_retry_with_label_and_delay() {
        let retrier = test_retrier(
            RetryPolicy::exponential(Duration::from_secs(1))
                .with_max_retries(2)
                .with_jitter(false),
        );

        let mut calls = 0u32;
        let _ = retrier.execute(Operation::new("flaky", || {
            calls += 1;
            if calls < 3 {
                Err("transient")
            } else {
                Ok(())
            }
        }));

        let warnings = retrier.logger.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("attempt 1"));
        assert!(warnings[0].contains("flaky"));
        assert!(warnings[0].contains("transient"));
        assert!(warnings[1].contains("attempt 2"));
    }

    #[test]
    fn test_jitter_uses_injected_random_source() {
        // unit sample 0.0 pins the jitter factor at exactly 0.5
        let retrier = test_retrier(
            RetryPolicy::exponential(Duration::from_secs(2)).with_max_retries(2),
        );

        let mut calls = 0u32;
        let _ = retrier.execute(Operation::new("flaky", || {
            calls += 1;
            if calls < 3 {
                Err("transient")
            } else {
                Ok(())
            }
        }));

        assert_eq!(
            retrier.sleeper.delays(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn test_invalid_policy_rejected_at_construction() {
        let result = Retrier::new(RetryPolicy::exponential(Duration::ZERO));
        assert_eq!(result.unwrap_err(), PolicyError::ZeroBaseDelay);
    }

    #[test]
    fn test_operation_debug_shows_label_only() {
        let op = Operation::new("fetch", || Ok::<_, String>(()));
        let debug = format!("{:?}", op);
        assert!(debug.contains("fetch"));
        assert!(debug.contains("<closure>"));
    }
}
