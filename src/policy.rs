//! Retry policy types and configuration.

use std::time::Duration;

/// A retry policy describing how a failed operation is retried.
///
/// Policies are pure data - they describe retry behavior but don't execute it.
/// This makes them easy to test, clone, and inspect. Execution belongs to
/// [`Retrier`](crate::Retrier).
///
/// # Semantics
///
/// - `max_retries` counts *additional* attempts after the first, so the total
///   number of invocations is `max_retries + 1`.
/// - The raw delay before retry `n` is `min(max_delay, base_delay * 2^n)`.
/// - With jitter enabled, the raw delay is scaled by a uniform factor in
///   `[0.5, 1.0)`, so the applied delay never drops below half the raw value.
///
/// If `max_delay < base_delay`, every computed delay degrades to `max_delay`.
/// That configuration is tolerated rather than rejected; the clamp simply
/// dominates.
///
/// # Examples
///
/// ```rust
/// use ebbtide::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::exponential(Duration::from_secs(1))
///     .with_max_retries(5)
///     .with_max_delay(Duration::from_secs(30))
///     .with_jitter(false);
///
/// assert_eq!(policy.raw_delay_for_attempt(0), Duration::from_secs(1));
/// assert_eq!(policy.raw_delay_for_attempt(3), Duration::from_secs(8));
/// assert_eq!(policy.raw_delay_for_attempt(10), Duration::from_secs(30)); // clamped
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter: bool,
}

/// Error returned when a policy violates a construction invariant.
///
/// Checked once, by [`Retrier::new`](crate::Retrier::new) - never per retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// `base_delay` was zero.
    ZeroBaseDelay,
    /// `max_delay` was zero.
    ZeroMaxDelay,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroBaseDelay => write!(f, "base_delay must be greater than zero"),
            Self::ZeroMaxDelay => write!(f, "max_delay must be greater than zero"),
        }
    }
}

impl std::error::Error for PolicyError {}

impl RetryPolicy {
    /// Create an exponential backoff policy from a base delay.
    ///
    /// Defaults: 5 retries, 30 second delay cap, jitter enabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ebbtide::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(Duration::from_millis(100));
    /// assert_eq!(policy.max_retries(), 5);
    /// assert_eq!(policy.max_delay(), Duration::from_secs(30));
    /// assert!(policy.jitter());
    /// ```
    pub fn exponential(base_delay: Duration) -> Self {
        Self {
            max_retries: 5,
            base_delay,
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }

    /// Set the maximum number of retry attempts.
    ///
    /// This does not include the initial attempt: `with_max_retries(3)` means
    /// up to 4 total invocations. Zero is valid and means "try exactly once".
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the upper clamp applied to computed delays.
    pub fn with_max_delay(mut self, d: Duration) -> Self {
        self.max_delay = d;
        self
    }

    /// Enable or disable jitter.
    ///
    /// Jitter desynchronizes independent retriers hitting the same degraded
    /// dependency. Disable it only when exact delay sequences matter more
    /// than herd avoidance.
    pub fn with_jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Get the maximum number of retries.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Get the base delay.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Get the delay cap.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Whether jitter is enabled.
    pub fn jitter(&self) -> bool {
        self.jitter
    }

    /// Validate the construction invariants.
    ///
    /// Both delays must be non-zero. `max_delay < base_delay` is not an
    /// error; see the type-level docs for the degraded clamp behavior.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.base_delay.is_zero() {
            return Err(PolicyError::ZeroBaseDelay);
        }
        if self.max_delay.is_zero() {
            return Err(PolicyError::ZeroMaxDelay);
        }
        Ok(())
    }

    /// The pre-jitter delay for a 0-indexed attempt.
    ///
    /// Equals `min(max_delay, base_delay * 2^attempt)` with saturating math,
    /// so large attempt indices never overflow - they saturate into the clamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ebbtide::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::exponential(Duration::from_secs(10))
    ///     .with_max_delay(Duration::from_secs(15));
    ///
    /// assert_eq!(policy.raw_delay_for_attempt(0), Duration::from_secs(10));
    /// assert_eq!(policy.raw_delay_for_attempt(1), Duration::from_secs(15)); // 20s clamped
    /// assert_eq!(policy.raw_delay_for_attempt(2), Duration::from_secs(15)); // 40s clamped
    /// ```
    pub fn raw_delay_for_attempt(&self, attempt: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        doubled.min(self.max_delay)
    }

    /// Apply jitter to a raw delay using a uniform sample from `[0, 1)`.
    ///
    /// Returns `raw * (0.5 + unit / 2)` when jitter is enabled, i.e. a value
    /// in `[raw / 2, raw)`, and `raw` unchanged when disabled. The lower
    /// bound of 50% keeps delays growing with attempt count even under
    /// maximum jitter.
    pub fn jittered(&self, raw: Duration, unit: f64) -> Duration {
        if self.jitter {
            raw.mul_f64(0.5 + unit / 2.0)
        } else {
            raw
        }
    }
}
