//! Terminal outcomes of a retry sequence.

/// Error returned when all retry attempts are exhausted.
///
/// Contains the error from the final attempt along with the total number of
/// invocations made. The underlying failure is always surfaced, never
/// swallowed.
///
/// # Examples
///
/// ```rust
/// use ebbtide::RetryExhausted;
///
/// let err = RetryExhausted::new("connection refused", 4);
/// assert_eq!(err.attempts, 4);
/// assert_eq!(err.into_error(), "connection refused");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    /// The error from the final attempt.
    pub final_error: E,
    /// Total number of invocations made (initial attempt + retries).
    pub attempts: u32,
}

impl<E> RetryExhausted<E> {
    /// Create a new `RetryExhausted` error.
    pub fn new(final_error: E, attempts: u32) -> Self {
        Self {
            final_error,
            attempts,
        }
    }

    /// Extract the final error, discarding metadata.
    pub fn into_error(self) -> E {
        self.final_error
    }

    /// Get a reference to the final error.
    pub fn error(&self) -> &E {
        &self.final_error
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "retry exhausted after {} attempts: {}",
            self.attempts, self.final_error
        )
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryExhausted<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.final_error)
    }
}

/// Terminal failure of a retry sequence, for `Result`-shaped call sites.
///
/// Produced by [`RetryOutcome::into_result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// All permitted attempts failed.
    Exhausted(RetryExhausted<E>),
    /// The classifier rejected a failure; no retry was attempted.
    NonRetryable(E),
}

impl<E> RetryError<E> {
    /// Extract the underlying failure, discarding retry metadata.
    pub fn into_inner(self) -> E {
        match self {
            Self::Exhausted(e) => e.final_error,
            Self::NonRetryable(e) => e,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted(e) => write!(f, "{}", e),
            Self::NonRetryable(e) => write!(f, "{}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Exhausted(e) => Some(&e.final_error),
            Self::NonRetryable(e) => Some(e),
        }
    }
}

/// The result of one full retry sequence.
///
/// Exactly one of three things happens: the operation succeeds on some
/// attempt, the classifier rejects a failure, or every permitted attempt
/// fails.
///
/// # Examples
///
/// ```rust
/// use ebbtide::{RetryExhausted, RetryOutcome};
///
/// let success: RetryOutcome<i32, &str> = RetryOutcome::Success(42);
/// assert_eq!(success.ok(), Some(42));
///
/// let exhausted: RetryOutcome<i32, &str> =
///     RetryOutcome::Exhausted(RetryExhausted::new("timeout", 6));
/// assert!(exhausted.is_exhausted());
/// assert!(exhausted.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T, E> {
    /// The operation returned a value; its result is passed through untouched.
    Success(T),
    /// All permitted attempts failed with retryable errors.
    Exhausted(RetryExhausted<E>),
    /// A failure was rejected by the classifier and propagated immediately.
    NonRetryable(E),
}

impl<T, E> RetryOutcome<T, E> {
    /// Returns true if the operation eventually succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if all attempts were used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    /// Returns true if a failure was rejected by the classifier.
    pub fn is_non_retryable(&self) -> bool {
        matches!(self, Self::NonRetryable(_))
    }

    /// The success value, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Collapse into a `Result`, folding both terminal failures into
    /// [`RetryError`].
    pub fn into_result(self) -> Result<T, RetryError<E>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Exhausted(e) => Err(RetryError::Exhausted(e)),
            Self::NonRetryable(e) => Err(RetryError::NonRetryable(e)),
        }
    }
}
