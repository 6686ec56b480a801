//! Retry delay computation

use super::types::BatchOptions;
use std::time::Duration;

/// Fraction of the base delay added as random jitter, at most
const JITTER_FACTOR: f64 = 0.1;

/// Delay schedule for retrying a failed item
#[derive(Debug, Clone, Copy)]
pub struct RetryBackoff {
    base: Duration,
    exponential: bool,
    max_delay: Duration,
}

impl RetryBackoff {
    pub fn new(base: Duration, exponential: bool, max_delay: Duration) -> Self {
        Self {
            base,
            exponential,
            max_delay,
        }
    }

    /// Delay before attempt `attempt + 1`, with `attempt` starting at 1
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.with_jitter(attempt, rand::random::<f64>())
    }

    /// Delay for a given jitter sample in `[0, 1)`
    pub fn with_jitter(&self, attempt: u32, sample: f64) -> Duration {
        let base = self.base_delay(attempt);
        let jitter = base.mul_f64(JITTER_FACTOR * sample.clamp(0.0, 1.0));
        base.saturating_add(jitter).min(self.max_delay)
    }

    /// Delay without jitter
    pub fn base_delay(&self, attempt: u32) -> Duration {
        if !self.exponential {
            return self.base;
        }
        let exponent = attempt.saturating_sub(1).min(31);
        self.base.saturating_mul(1u32 << exponent)
    }
}

impl From<&BatchOptions> for RetryBackoff {
    fn from(options: &BatchOptions) -> Self {
        Self::new(
            options.retry_delay,
            options.exponential_backoff,
            options.max_retry_delay,
        )
    }
}
