//! Queue front-end and the worker that drains it

use super::call::{Attempt, Dispatch, PendingCall};
use super::governor::RateGovernor;
use super::types::{QueueEntry, RateState};
use crate::config::SerializerConfig;
use crate::core::remote::RemoteResponse;
use crate::utils::error::{GateError, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, info};

/// Upper bound for a hold deadline when the requested wait overflows `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// State shared between the front-end and its worker task
#[derive(Debug)]
struct Shared {
    governor: RateGovernor,
    /// Entries submitted but not yet taken by the worker
    pending: AtomicUsize,
    /// No queued call departs before this instant after a 429
    hold_until: Mutex<Option<Instant>>,
}

impl Shared {
    /// Keep the queue closed for `wait` from now, extending any existing hold
    fn hold_for(&self, wait: Duration) {
        let now = Instant::now();
        let until = now
            .checked_add(wait)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut hold = self.hold_until.lock();
        *hold = Some(hold.map_or(until, |current| current.max(until)));
    }

    fn hold_deadline(&self) -> Option<Instant> {
        *self.hold_until.lock()
    }
}

/// Serializes remote calls through a single FIFO queue
///
/// At most one queued call is in flight at any time. A call deferred by a 429
/// is retried off the queue once its wait elapses, and nothing else departs
/// during that wait. Must be created inside a Tokio runtime.
#[derive(Debug)]
pub struct RequestSerializer {
    sender: mpsc::UnboundedSender<QueueEntry>,
    shared: Arc<Shared>,
    next_id: AtomicU64,
}

impl RequestSerializer {
    /// Create a serializer and spawn its worker
    ///
    /// The worker exits once the serializer is dropped and the queue drains.
    pub fn new(config: SerializerConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            governor: RateGovernor::new(config),
            pending: AtomicUsize::new(0),
            hold_until: Mutex::new(None),
        });

        tokio::spawn(drain(receiver, Arc::clone(&shared)));
        info!("Request serializer started");

        Self {
            sender,
            shared,
            next_id: AtomicU64::new(0),
        }
    }

    /// Enqueue `operation` and wait for its result
    ///
    /// The operation may be invoked twice: once from the queue, and once more
    /// if the first run is rejected with a rate limit error.
    pub async fn submit<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<RemoteResponse<T>>> + Send + 'static,
    {
        let (reply, outcome) = oneshot::channel();
        let entry = QueueEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            submitted_at: Instant::now(),
            call: Box::new(PendingCall::new(operation, reply)),
        };

        self.shared.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(entry).is_err() {
            self.shared.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(GateError::QueueClosed(
                "serializer worker is no longer running".to_string(),
            ));
        }

        outcome.await.map_err(|_| {
            GateError::QueueClosed("queued call was dropped before it settled".to_string())
        })?
    }

    /// Current quota and spacing
    pub fn rate_state(&self) -> RateState {
        self.shared.governor.snapshot()
    }

    /// Calls waiting to depart
    pub fn pending(&self) -> usize {
        self.shared.pending.load(Ordering::SeqCst)
    }
}

async fn drain(mut receiver: mpsc::UnboundedReceiver<QueueEntry>, shared: Arc<Shared>) {
    let mut next_departure: Option<Instant> = None;

    while let Some(mut entry) = receiver.recv().await {
        if let Some(at) = next_departure.take() {
            sleep_until(at).await;
        }
        // A retry may have been rejected again while we slept
        while let Some(hold) = shared.hold_deadline() {
            if hold <= Instant::now() {
                break;
            }
            sleep_until(hold).await;
        }
        shared.pending.fetch_sub(1, Ordering::SeqCst);
        debug!(
            id = entry.id,
            "Dispatching queued call after {:?} in queue",
            entry.submitted_at.elapsed()
        );

        match entry.call.attempt().await {
            Attempt::Settled { quota, succeeded } => {
                shared.governor.observe_response(quota.as_ref(), succeeded);
            }
            Attempt::RateLimited(details) => {
                let wait = shared.governor.observe_rate_limit(&details);
                shared.hold_for(wait);
                spawn_retry(entry.id, entry.call, wait, Arc::clone(&shared));
            }
        }

        let backlog = shared.pending.load(Ordering::SeqCst);
        next_departure = Some(Instant::now() + shared.governor.next_delay(backlog));
    }

    debug!("Request serializer queue closed");
}

fn spawn_retry(id: u64, mut call: Box<dyn Dispatch>, wait: Duration, shared: Arc<Shared>) {
    tokio::spawn(async move {
        sleep(wait).await;
        debug!(id, "Retrying rate limited call");
        match call.retry().await {
            Attempt::Settled { quota, succeeded } => {
                shared.governor.observe_response(quota.as_ref(), succeeded);
            }
            Attempt::RateLimited(details) => {
                // The caller already has the error; only back off the queue
                let wait = shared.governor.observe_rate_limit(&details);
                shared.hold_for(wait);
            }
        }
    });
}
