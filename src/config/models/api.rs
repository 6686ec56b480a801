//! Remote API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Remote task API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://tasks.example.com/api/1.0`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,
    /// Workspace whose containers are scanned when no container is given
    #[serde(default)]
    pub workspace_id: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            workspace_id: String::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
