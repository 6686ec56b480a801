//! Lookup cache implementation

use super::types::{AtomicCacheStats, CacheEntry, CacheStats};
use dashmap::DashMap;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::debug;

/// Name → id memo with a fixed TTL
///
/// Keys are the literal strings used at lookup time; no normalization happens
/// here, so "Launch" and "launch" are distinct entries.
#[derive(Debug)]
pub struct LookupCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    stats: AtomicCacheStats,
}

impl LookupCache {
    /// Default TTL: 5 minutes
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            stats: AtomicCacheStats::default(),
        }
    }

    /// Cached id for `key`, evicting it if it has outlived the TTL
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Lookup cache hit for '{}'", key);
                return Some(entry.id.clone());
            }
            Some(_) => true,
            None => false,
        };

        // The read guard above is released before removing
        if expired
            && self
                .entries
                .remove_if(key, |_, entry| entry.is_expired(self.ttl))
                .is_some()
        {
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            debug!("Lookup cache entry for '{}' expired", key);
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store or overwrite `key`, restarting its TTL
    pub fn set(&self, key: impl Into<String>, id: impl Into<String>) {
        self.entries.insert(key.into(), CacheEntry::new(id.into()));
    }

    /// Drop a single entry
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.stats.reset();
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
