//! Batch operation processing
//!
//! Runs an async operation over a list of items in sequential batches, with
//! bounded concurrency inside each batch and per-item retry with backoff.
//! Individual failures never fail the whole run.

mod backoff;
mod processor;
mod types;


pub use backoff::RetryBackoff;
pub use processor::BatchProcessor;
pub use types::{BatchFailure, BatchOptions, BatchResult, BatchSuccess, BatchTotals};
