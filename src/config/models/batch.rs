//! Batch processing defaults

use super::*;
use serde::{Deserialize, Serialize};

/// Defaults applied to batch runs started from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_true")]
    pub exponential_backoff: bool,
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
            continue_on_error: true,
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            exponential_backoff: true,
            max_retry_delay_ms: default_max_retry_delay_ms(),
        }
    }
}
