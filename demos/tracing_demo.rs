//! Demonstrates routing retry diagnostics through tracing
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::cell::Cell;
use std::time::Duration;

use ebbtide::{Operation, Retrier, RetryPolicy, TracingLogger};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let retrier = Retrier::new(
        RetryPolicy::exponential(Duration::from_millis(100)).with_max_retries(4),
    )
    .expect("valid policy")
    .with_logger(TracingLogger);

    // Fails twice, then succeeds; the retry warnings arrive as tracing events.
    let calls = Cell::new(0u32);
    let outcome = retrier.execute(Operation::new("fetch data", || {
        let n = calls.get() + 1;
        calls.set(n);
        if n < 3 {
            Err("connection reset")
        } else {
            Ok("raw data")
        }
    }));

    match outcome.into_result() {
        Ok(data) => tracing::info!("fetch completed: {}", data),
        Err(e) => tracing::error!("fetch failed: {}", e),
    }

    // Exhaustion path: the terminal failure arrives as an error event.
    let outcome = retrier.execute(Operation::new("doomed fetch", || {
        Err::<(), _>("host unreachable")
    }));
    tracing::info!("doomed fetch gave up: {:?}", outcome.is_exhausted());
}
