//! Lookup context cache
//!
//! Short-lived memo of name → id resolutions so repeated lookups of the same
//! name within a session skip the full workspace scan. Entries expire lazily:
//! there is no background sweep, an expired entry is dropped when it is read.

pub mod cache;
pub mod types;


pub use cache::LookupCache;
pub use types::{CacheEntry, CacheStats};
