//! Batch processing types

use crate::config::BatchConfig;
use crate::utils::error::{GateError, Result};
use serde::Serialize;
use std::time::Duration;

/// Options for a single batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    /// Items per sequential batch (default: 10)
    pub batch_size: usize,
    /// Items in flight at once inside a batch (default: 3)
    pub concurrency: usize,
    /// Keep starting batches after an item fails for good (default: true)
    pub continue_on_error: bool,
    /// Retries after the first failed attempt (default: 3)
    pub retry_count: u32,
    /// Base delay between retries (default: 1s)
    pub retry_delay: Duration,
    /// Double the delay on every retry (default: true)
    pub exponential_backoff: bool,
    /// Upper bound on any single retry delay (default: 30s)
    pub max_retry_delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&BatchConfig::default())
    }
}

impl From<&BatchConfig> for BatchOptions {
    fn from(config: &BatchConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            concurrency: config.concurrency,
            continue_on_error: config.continue_on_error,
            retry_count: config.retry_count,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            exponential_backoff: config.exponential_backoff,
            max_retry_delay: Duration::from_millis(config.max_retry_delay_ms),
        }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_exponential_backoff(mut self, exponential_backoff: bool) -> Self {
        self.exponential_backoff = exponential_backoff;
        self
    }

    pub fn with_max_retry_delay(mut self, max_retry_delay: Duration) -> Self {
        self.max_retry_delay = max_retry_delay;
        self
    }

    /// Reject options that could never make progress
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(GateError::Validation(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(GateError::Validation(
                "concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// An item whose operation eventually succeeded
#[derive(Debug, Clone, Serialize)]
pub struct BatchSuccess<R> {
    /// Position of the item in the input
    pub index: usize,
    pub value: R,
    /// Attempts it took, including the successful one
    pub attempts: u32,
}

/// An item that failed permanently or never started
#[derive(Debug)]
pub struct BatchFailure<I> {
    pub item: I,
    /// Error from the last attempt, or `Aborted` if the item never ran
    pub error: GateError,
    /// Position of the item in the input
    pub index: usize,
    /// Attempts made; zero for aborted items
    pub attempts: u32,
}

/// Outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub success: usize,
    pub failure: usize,
    pub total: usize,
}

/// Everything a batch run produced
///
/// `successful` and `failed` are in completion order; use `index` to map
/// entries back to the input.
#[derive(Debug)]
pub struct BatchResult<I, R> {
    pub successful: Vec<BatchSuccess<R>>,
    pub failed: Vec<BatchFailure<I>>,
    pub totals: BatchTotals,
}

impl<I, R> BatchResult<I, R> {
    pub(super) fn with_capacity(total: usize) -> Self {
        Self {
            successful: Vec::with_capacity(total),
            failed: Vec::new(),
            totals: BatchTotals {
                total,
                ..BatchTotals::default()
            },
        }
    }

    pub(super) fn record_success(&mut self, success: BatchSuccess<R>) {
        self.totals.success += 1;
        self.successful.push(success);
    }

    pub(super) fn record_failure(&mut self, failure: BatchFailure<I>) {
        self.totals.failure += 1;
        self.failed.push(failure);
    }

    /// Whether every item succeeded
    pub fn is_complete(&self) -> bool {
        self.totals.failure == 0
    }

    /// Successful values ordered by input index
    pub fn values_in_order(&self) -> Vec<&R> {
        let mut successful: Vec<&BatchSuccess<R>> = self.successful.iter().collect();
        successful.sort_by_key(|s| s.index);
        successful.into_iter().map(|s| &s.value).collect()
    }
}
