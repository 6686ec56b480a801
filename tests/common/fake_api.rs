//! In-memory task API
//!
//! Serves a fixed workspace, records every call with its departure time and
//! can be told to reject calls with 429s or fail whole containers.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use taskgate::core::remote::{NamedEntity, QuotaSnapshot, RateLimitDetails, RemoteResponse, TaskApi};
use taskgate::{GateError, Result};
use tokio::time::Instant;

/// One recorded call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: String,
    pub at: Instant,
}

#[derive(Debug, Default)]
pub struct FakeTaskApi {
    containers: Vec<NamedEntity>,
    items: HashMap<String, Vec<NamedEntity>>,
    failing: HashSet<String>,
    quota: Option<QuotaSnapshot>,
    rate_limits: Mutex<VecDeque<Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, id: &str, name: &str, items: Vec<NamedEntity>) -> Self {
        self.containers.push(NamedEntity::new(id, name));
        self.items.insert(id.to_string(), items);
        self
    }

    /// Listing this container fails with a 503
    pub fn with_failing_container(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Report these quota headers on every successful response
    pub fn with_quota(mut self, quota: QuotaSnapshot) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Reject the next call with a 429 carrying `retry_after`
    pub fn rate_limit_next(&self, retry_after: Duration) {
        self.rate_limits.lock().push_back(retry_after);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, endpoint: String) -> Result<()> {
        self.calls.lock().push(RecordedCall {
            endpoint,
            at: Instant::now(),
        });

        match self.rate_limits.lock().pop_front() {
            Some(retry_after) => Err(GateError::RateLimit {
                message: "Too Many Requests".to_string(),
                details: RateLimitDetails {
                    quota: None,
                    retry_after: Some(retry_after),
                },
            }),
            None => Ok(()),
        }
    }

    fn respond(&self, entities: Vec<NamedEntity>) -> RemoteResponse<Vec<NamedEntity>> {
        match self.quota {
            Some(quota) => RemoteResponse::with_quota(entities, quota),
            None => RemoteResponse::new(entities),
        }
    }
}

#[async_trait]
impl TaskApi for FakeTaskApi {
    async fn list_containers(
        &self,
        workspace_id: &str,
    ) -> Result<RemoteResponse<Vec<NamedEntity>>> {
        self.record(format!("workspaces/{}/containers", workspace_id))?;
        Ok(self.respond(self.containers.clone()))
    }

    async fn list_items(&self, container_id: &str) -> Result<RemoteResponse<Vec<NamedEntity>>> {
        self.record(format!("containers/{}/items", container_id))?;
        if self.failing.contains(container_id) {
            return Err(GateError::Server {
                status: 503,
                message: format!("container {} unavailable", container_id),
            });
        }
        let items = self
            .items
            .get(container_id)
            .cloned()
            .ok_or_else(|| GateError::NotFound(format!("container {}", container_id)))?;
        Ok(self.respond(items))
    }
}
