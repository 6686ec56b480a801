//! Configuration data models
//!
//! This module defines all configuration structures used throughout taskgate.

#![allow(missing_docs)]

pub mod api;
pub mod batch;
pub mod logging;
pub mod resolver;
pub mod serializer;

// Re-export all configuration types
pub use api::*;
pub use batch::*;
pub use logging::*;
pub use resolver::*;
pub use serializer::*;

/// Default remote API base URL
pub fn default_base_url() -> String {
    "http://localhost:8080/api/1.0".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_user_agent() -> String {
    format!("taskgate/{}", env!("CARGO_PKG_VERSION"))
}

/// Default spacing between serialized calls
pub fn default_spacing_ms() -> u64 {
    100
}

pub fn default_max_proactive_spacing_ms() -> u64 {
    5_000
}

pub fn default_max_reactive_spacing_ms() -> u64 {
    10_000
}

/// Fraction of the quota below which spacing adapts
pub fn default_low_quota_ratio() -> f64 {
    0.2
}

/// Remaining calls at or below which the maximum factor applies
pub fn default_low_quota_floor() -> u32 {
    5
}

pub fn default_min_spacing_factor() -> f64 {
    1.1
}

pub fn default_max_spacing_factor() -> f64 {
    2.0
}

pub fn default_backlog_threshold() -> usize {
    10
}

/// Wait applied to a 429 carrying neither `retry-after` nor a reset epoch
pub fn default_fallback_retry_after_ms() -> u64 {
    1_000
}

pub fn default_batch_size() -> usize {
    10
}

pub fn default_concurrency() -> usize {
    3
}

pub fn default_retry_count() -> u32 {
    3
}

pub fn default_retry_delay_ms() -> u64 {
    1_000
}

pub fn default_max_retry_delay_ms() -> u64 {
    30_000
}

/// Lookup cache TTL (5 minutes)
pub fn default_cache_ttl_secs() -> u64 {
    300
}

/// Inputs matching this pattern are treated as ids rather than names
pub fn default_id_pattern() -> String {
    r"^\d+$".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
