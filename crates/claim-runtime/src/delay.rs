//! Inter-cycle pacing.

use std::time::Duration;

use rand::Rng;

/// Inclusive range of pauses between cycles, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// No pause at all.
    pub const NONE: Self = Self {
        min_ms: 0,
        max_ms: 0,
    };

    /// Build a range. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// Lower bound in milliseconds.
    #[must_use]
    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    /// Upper bound in milliseconds.
    #[must_use]
    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Whether every sample is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.max_ms == 0
    }

    /// Draw a pause uniformly from the range.
    #[must_use]
    pub fn sample(&self) -> Duration {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draw a pause using the given random source.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.is_zero() {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    /// Whether `delay` lies within the range.
    #[must_use]
    pub fn contains(&self, delay: Duration) -> bool {
        let min = Duration::from_millis(self.min_ms);
        let max = Duration::from_millis(self.max_ms);
        delay >= min && delay <= max
    }
}
