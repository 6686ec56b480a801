//! Type-erased pending calls

use crate::core::remote::{QuotaSnapshot, RateLimitDetails, RemoteResponse};
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use std::future::Future;
use tokio::sync::oneshot;
use tracing::debug;

/// Outcome of running a queued call once
#[derive(Debug)]
pub(super) enum Attempt {
    /// The caller has its result
    Settled {
        quota: Option<QuotaSnapshot>,
        succeeded: bool,
    },
    /// 429. After a first run the caller is still waiting for the single
    /// retry; after the retry the caller already has the error.
    RateLimited(RateLimitDetails),
}

/// A queued operation with its reply channel, erased over the result type
#[async_trait]
pub(super) trait Dispatch: Send {
    /// First run. Settles the caller unless the remote rate limited us.
    async fn attempt(&mut self) -> Attempt;

    /// Final run after a 429. Always settles the caller.
    async fn retry(&mut self) -> Attempt;
}

pub(super) struct PendingCall<T, F> {
    operation: F,
    reply: Option<oneshot::Sender<Result<T>>>,
}

impl<T, F> PendingCall<T, F> {
    pub(super) fn new(operation: F, reply: oneshot::Sender<Result<T>>) -> Self {
        Self {
            operation,
            reply: Some(reply),
        }
    }

    fn settle(&mut self, result: Result<T>) {
        if let Some(reply) = self.reply.take() {
            if reply.send(result).is_err() {
                debug!("Caller dropped before its queued call settled");
            }
        }
    }
}

#[async_trait]
impl<T, F, Fut> Dispatch for PendingCall<T, F>
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<RemoteResponse<T>>> + Send + 'static,
{
    async fn attempt(&mut self) -> Attempt {
        match (self.operation)().await {
            Ok(response) => {
                self.settle(Ok(response.value));
                Attempt::Settled {
                    quota: response.quota,
                    succeeded: true,
                }
            }
            Err(GateError::RateLimit { message, details }) => {
                debug!("Queued call rate limited: {}", message);
                Attempt::RateLimited(details)
            }
            Err(err) => {
                self.settle(Err(err));
                Attempt::Settled {
                    quota: None,
                    succeeded: false,
                }
            }
        }
    }

    async fn retry(&mut self) -> Attempt {
        match (self.operation)().await {
            Ok(response) => {
                let quota = response.quota;
                self.settle(Ok(response.value));
                Attempt::Settled {
                    quota,
                    succeeded: true,
                }
            }
            Err(err) => {
                let details = err.rate_limit_details().cloned();
                self.settle(Err(err));
                match details {
                    Some(details) => Attempt::RateLimited(details),
                    None => Attempt::Settled {
                        quota: None,
                        succeeded: false,
                    },
                }
            }
        }
    }
}
