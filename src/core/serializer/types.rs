//! Serializer types and data structures

use super::call::Dispatch;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Last known quota and the spacing derived from it
///
/// Owned by one serializer and mutated only after responses.
/// Invariant: `current_spacing >= default spacing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateState {
    /// Calls allowed per window, if the API reported it
    pub limit: Option<u32>,
    /// Calls left in the window, if the API reported it
    pub remaining: Option<u32>,
    /// Unix epoch seconds at which the window resets
    pub reset_epoch_secs: Option<i64>,
    /// Delay enforced between departures
    #[serde(with = "duration_ms")]
    pub current_spacing: Duration,
    /// Number of 429 responses seen so far
    pub rate_limited_count: u64,
}

impl RateState {
    pub fn new(default_spacing: Duration) -> Self {
        Self {
            limit: None,
            remaining: None,
            reset_epoch_secs: None,
            current_spacing: default_spacing,
            rate_limited_count: 0,
        }
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}

/// A call waiting in the queue
pub(super) struct QueueEntry {
    /// Submission sequence number
    pub(super) id: u64,
    pub(super) submitted_at: Instant,
    pub(super) call: Box<dyn Dispatch>,
}

impl std::fmt::Debug for QueueEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueEntry")
            .field("id", &self.id)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}
