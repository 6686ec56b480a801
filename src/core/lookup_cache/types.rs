//! Lookup cache type definitions

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// A resolved id and when it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Resolved identifier
    pub id: String,
    /// When the entry was created or last overwritten
    pub timestamp: Instant,
}

impl CacheEntry {
    pub fn new(id: String) -> Self {
        Self {
            id,
            timestamp: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Instant::now().duration_since(self.timestamp)
    }

    /// Entries are valid up to and including `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

/// Atomic cache statistics for lock-free updates
#[derive(Debug, Default)]
pub(crate) struct AtomicCacheStats {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) evictions: AtomicU64,
}

impl AtomicCacheStats {
    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped on read because they outlived the TTL
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
