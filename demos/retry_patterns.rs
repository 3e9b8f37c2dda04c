//! Retry Patterns Example
//!
//! Demonstrates the retry executor against a flaky in-process operation.
//! Shows practical patterns including:
//! - Basic retry with exponential backoff and jitter
//! - Conditional retry (execute_if) separating transient from permanent errors
//! - Exhaustion handling with the final error surfaced

use std::cell::Cell;
use std::time::Duration;

use ebbtide::prelude::*;

#[derive(Debug)]
enum StoreError {
    Unavailable,
    CorruptRecord,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "store temporarily unavailable"),
            Self::CorruptRecord => write!(f, "record is corrupt"),
        }
    }
}

/// Example 1: Basic retry
///
/// The operation fails twice, then succeeds. Watch the warnings and delays
/// printed by the fallback stdout logger.
fn example_basic_retry() {
    println!("\n=== Example 1: Basic Retry ===");

    let retrier = Retrier::new(
        RetryPolicy::exponential(Duration::from_millis(100)).with_max_retries(5),
    )
    .expect("valid policy");

    let calls = Cell::new(0u32);
    let outcome = retrier.execute(Operation::new("read record", || {
        let n = calls.get() + 1;
        calls.set(n);
        println!("  attempt {}", n);
        if n < 3 {
            Err(StoreError::Unavailable)
        } else {
            Ok("record #42")
        }
    }));

    println!("  outcome: {:?}", outcome.ok());
}

/// Example 2: Conditional retry
///
/// Corrupt records will never heal; only availability errors are retried.
fn example_classified_retry() {
    println!("\n=== Example 2: Conditional Retry ===");

    let retrier = Retrier::new(
        RetryPolicy::exponential(Duration::from_millis(100)).with_max_retries(5),
    )
    .expect("valid policy");

    let outcome = retrier.execute_if(
        Operation::new("read record", || Err::<(), _>(StoreError::CorruptRecord)),
        |e| matches!(e, StoreError::Unavailable),
    );

    println!("  non-retryable, no delay incurred: {:?}", outcome);
}

/// Example 3: Exhaustion
///
/// Every attempt fails; the final error is surfaced with the attempt count.
fn example_exhaustion() {
    println!("\n=== Example 3: Exhaustion ===");

    let retrier = Retrier::new(
        RetryPolicy::exponential(Duration::from_millis(50))
            .with_max_retries(2)
            .with_max_delay(Duration::from_millis(200)),
    )
    .expect("valid policy");

    let result = retrier
        .execute(Operation::new("read record", || {
            Err::<(), _>(StoreError::Unavailable)
        }))
        .into_result();

    match result {
        Err(RetryError::Exhausted(e)) => {
            println!("  gave up after {} attempts: {}", e.attempts, e.final_error)
        }
        other => println!("  unexpected: {:?}", other),
    }
}

fn main() {
    example_basic_retry();
    example_classified_retry();
    example_exhaustion();
}
