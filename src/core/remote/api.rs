//! Remote task API abstraction

use super::types::{NamedEntity, RemoteResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the remote task-management API
///
/// Implementations classify their own failures into [`crate::utils::error::GateError`]
/// variants and attach quota data to rate limit rejections. Calls are expected to be
/// routed through a [`crate::core::serializer::RequestSerializer`] by the caller.
#[async_trait]
pub trait TaskApi: Send + Sync + 'static {
    /// Every container (project, list, board...) reachable from the workspace root
    async fn list_containers(&self, workspace_id: &str)
    -> Result<RemoteResponse<Vec<NamedEntity>>>;

    /// Items (tasks) inside a single container
    async fn list_items(&self, container_id: &str) -> Result<RemoteResponse<Vec<NamedEntity>>>;
}
