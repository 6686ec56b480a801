//! reqwest-backed [`TaskApi`] implementation

use super::api::TaskApi;
use super::headers::{parse_quota, rate_limit_details};
use super::types::{NamedEntity, RemoteResponse};
use crate::config::models::ApiConfig;
use crate::utils::error::{GateError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// `{"data": ...}` envelope used by every list endpoint
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the remote task API
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTaskApi {
    /// Build a client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<RemoteResponse<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GateError::Network(format!("GET {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let quota = parse_quota(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| GateError::Network(format!("Reading {} failed: {}", path, e)))?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body)?;

        Ok(RemoteResponse {
            value: envelope.data,
            quota,
        })
    }

    /// Turn a non-2xx response into a classified error
    async fn classify_failure(response: Response) -> GateError {
        let status = response.status();
        let details = rate_limit_details(response.headers());
        let body = response.text().await.unwrap_or_default();
        let message = Self::error_message(status, &body);

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                "Remote API rate limited the request (retry-after: {:?})",
                details.retry_after
            );
            return GateError::RateLimit { message, details };
        }

        GateError::from_status(status.as_u16(), message)
    }

    fn error_message(status: StatusCode, body: &str) -> String {
        let from_envelope = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|env| {
                env.errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|m| !m.is_empty());

        match from_envelope {
            Some(message) => message,
            None if body.trim().is_empty() => status.to_string(),
            None => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_containers(
        &self,
        workspace_id: &str,
    ) -> Result<RemoteResponse<Vec<NamedEntity>>> {
        self.get_data(&format!("/workspaces/{}/containers", workspace_id))
            .await
    }

    async fn list_items(&self, container_id: &str) -> Result<RemoteResponse<Vec<NamedEntity>>> {
        self.get_data(&format!("/containers/{}/items", container_id))
            .await
    }
}
