//! Randomness for jitter.

/// Capability producing uniform samples in `[0, 1)` for jitter.
///
/// Injected rather than ambient so tests can pin delays exactly. Takes
/// `&self` so a [`Retrier`](crate::Retrier) can be shared across threads;
/// implementations are expected to be stateless or internally synchronized.
pub trait RandomSource {
    /// A uniform sample in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn next_unit(&self) -> f64 {
        (**self).next_unit()
    }
}

/// Default randomness backed by the thread-local generator from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        use rand::Rng;
        rand::rng().random::<f64>()
    }
}
