//! Batch processor

use super::backoff::RetryBackoff;
use super::types::{BatchFailure, BatchOptions, BatchResult, BatchSuccess};
use crate::utils::error::{GateError, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Runs one operation over many items
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    options: BatchOptions,
    backoff: RetryBackoff,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        let backoff = RetryBackoff::from(&options);
        Self { options, backoff }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Process `items` and report every outcome
    ///
    /// Items are split into `ceil(len / batch_size)` batches run one after
    /// another. Inside a batch, chunks of `concurrency` items run together and
    /// every chunk settles before the next starts. Each failing item is retried
    /// up to `retry_count` times.
    ///
    /// Only invalid options produce an `Err`; item failures land in
    /// [`BatchResult::failed`].
    pub async fn process<I, R, F, Fut>(
        &self,
        items: Vec<I>,
        operation: F,
    ) -> Result<BatchResult<I, R>>
    where
        I: Clone,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        self.options.validate()?;

        let total = items.len();
        let mut result = BatchResult::with_capacity(total);
        if total == 0 {
            return Ok(result);
        }

        let started = Instant::now();
        let batch_count = total.div_ceil(self.options.batch_size);
        let mut pending = items.into_iter().enumerate();
        let mut aborted = false;

        for batch_number in 1..=batch_count {
            let batch: Vec<(usize, I)> = pending.by_ref().take(self.options.batch_size).collect();

            if aborted {
                for (index, item) in batch {
                    result.record_failure(BatchFailure {
                        item,
                        error: GateError::Aborted(format!(
                            "batch {} not started after an earlier batch failed",
                            batch_number
                        )),
                        index,
                        attempts: 0,
                    });
                }
                continue;
            }

            debug!("Starting batch {}/{} ({} items)", batch_number, batch_count, batch.len());
            let mut batch_failed = false;
            let mut batch = batch.into_iter().peekable();

            while batch.peek().is_some() {
                let mut in_flight: FuturesUnordered<_> = batch
                    .by_ref()
                    .take(self.options.concurrency)
                    .map(|(index, item)| self.run_item(index, item, &operation))
                    .collect();

                while let Some(outcome) = in_flight.next().await {
                    match outcome {
                        Ok(success) => result.record_success(success),
                        Err(failure) => {
                            warn!(
                                "Item {} failed after {} attempts: {}",
                                failure.index, failure.attempts, failure.error
                            );
                            batch_failed = true;
                            result.record_failure(failure);
                        }
                    }
                }
            }

            if batch_failed && !self.options.continue_on_error {
                warn!(
                    "Batch {}/{} had failures, skipping the remaining batches",
                    batch_number, batch_count
                );
                aborted = true;
            }
        }

        info!(
            "Batch run finished: {} succeeded, {} failed of {} in {:?}",
            result.totals.success,
            result.totals.failure,
            result.totals.total,
            started.elapsed()
        );
        Ok(result)
    }

    async fn run_item<I, R, F, Fut>(
        &self,
        index: usize,
        item: I,
        operation: &F,
    ) -> std::result::Result<BatchSuccess<R>, BatchFailure<I>>
    where
        I: Clone,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let max_attempts = self.options.retry_count.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation(item.clone()).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Item {} succeeded on attempt {}", index, attempt);
                    }
                    return Ok(BatchSuccess {
                        index,
                        value,
                        attempts: attempt,
                    });
                }
                Err(error) if attempt < max_attempts => {
                    let delay = self.backoff.delay_for(attempt);
                    debug!(
                        "Item {} attempt {} failed: {}, retrying in {:?}",
                        index, attempt, error, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => {
                    return Err(BatchFailure {
                        item,
                        error,
                        index,
                        attempts: attempt,
                    });
                }
            }
        }
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(BatchOptions::default())
    }
}
