//! Remote API data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Quota headers reported by the remote API on a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    /// Calls allowed per window
    pub limit: u32,
    /// Calls left in the current window
    pub remaining: u32,
    /// Unix epoch (seconds) at which the window resets
    pub reset_epoch_secs: Option<i64>,
}

impl QuotaSnapshot {
    /// Milliseconds until the window resets, measured from `now_ms`
    pub fn millis_until_reset(&self, now_ms: i64) -> Option<u64> {
        self.reset_epoch_secs
            .map(|reset| reset.saturating_mul(1000).saturating_sub(now_ms).max(0) as u64)
    }
}

/// Data attached to a rate limit rejection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitDetails {
    /// Quota headers on the 429 response, if any
    pub quota: Option<QuotaSnapshot>,
    /// Parsed `retry-after`
    pub retry_after: Option<Duration>,
}

/// A successful remote call together with the quota it reported
#[derive(Debug, Clone)]
pub struct RemoteResponse<T> {
    pub value: T,
    pub quota: Option<QuotaSnapshot>,
}

impl<T> RemoteResponse<T> {
    /// Response without quota headers
    pub fn new(value: T) -> Self {
        Self { value, quota: None }
    }

    /// Response carrying quota headers
    pub fn with_quota(value: T, quota: QuotaSnapshot) -> Self {
        Self {
            value,
            quota: Some(quota),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteResponse<U> {
        RemoteResponse {
            value: f(self.value),
            quota: self.quota,
        }
    }
}

/// Anything the resolver can match by name: a container or an item inside one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NamedEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            updated_at: None,
        }
    }

    pub fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }
}
