//! Request serializer configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for the adaptive request serializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// Spacing between calls while the quota is healthy
    #[serde(default = "default_spacing_ms")]
    pub default_spacing_ms: u64,
    /// Upper bound for spacing derived from quota headers
    #[serde(default = "default_max_proactive_spacing_ms")]
    pub max_proactive_spacing_ms: u64,
    /// Upper bound for spacing after an actual 429
    #[serde(default = "default_max_reactive_spacing_ms")]
    pub max_reactive_spacing_ms: u64,
    #[serde(default = "default_low_quota_ratio")]
    pub low_quota_ratio: f64,
    #[serde(default = "default_low_quota_floor")]
    pub low_quota_floor: u32,
    #[serde(default = "default_min_spacing_factor")]
    pub min_spacing_factor: f64,
    #[serde(default = "default_max_spacing_factor")]
    pub max_spacing_factor: f64,
    /// Queue depth beyond which inter-call delay stretches
    #[serde(default = "default_backlog_threshold")]
    pub backlog_threshold: usize,
    #[serde(default = "default_fallback_retry_after_ms")]
    pub fallback_retry_after_ms: u64,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            default_spacing_ms: default_spacing_ms(),
            max_proactive_spacing_ms: default_max_proactive_spacing_ms(),
            max_reactive_spacing_ms: default_max_reactive_spacing_ms(),
            low_quota_ratio: default_low_quota_ratio(),
            low_quota_floor: default_low_quota_floor(),
            min_spacing_factor: default_min_spacing_factor(),
            max_spacing_factor: default_max_spacing_factor(),
            backlog_threshold: default_backlog_threshold(),
            fallback_retry_after_ms: default_fallback_retry_after_ms(),
        }
    }
}

impl SerializerConfig {
    pub fn default_spacing(&self) -> Duration {
        Duration::from_millis(self.default_spacing_ms)
    }

    pub fn max_proactive_spacing(&self) -> Duration {
        Duration::from_millis(self.max_proactive_spacing_ms)
    }

    pub fn max_reactive_spacing(&self) -> Duration {
        Duration::from_millis(self.max_reactive_spacing_ms)
    }

    pub fn fallback_retry_after(&self) -> Duration {
        Duration::from_millis(self.fallback_retry_after_ms)
    }
}
