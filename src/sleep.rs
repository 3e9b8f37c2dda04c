//! Blocking suspension between attempts.

use std::time::Duration;

/// Capability for suspending the calling thread between attempts.
///
/// The executor holds the only sleep call in the crate behind this trait so
/// that tests can record requested delays instead of waiting them out. A
/// sleeper must be infallible and, if shared across threads, safe to call
/// concurrently.
pub trait Sleeper {
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Default sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
