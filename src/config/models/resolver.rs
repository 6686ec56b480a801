//! Name resolver configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when several candidates tie on exactness, score and recency
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Take the first candidate found and log the tie
    #[default]
    PickFirst,
    /// Fail with an ambiguous-match error listing the tied ids
    Reject,
}

/// Name resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Lookup cache TTL in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Regex deciding whether a container reference is an id
    #[serde(default = "default_id_pattern")]
    pub id_pattern: String,
    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            id_pattern: default_id_pattern(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
