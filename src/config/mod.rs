//! Configuration management for taskgate
//!
//! This module handles loading, validation, and management of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "TASKGATE_";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub serializer: SerializerConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GateError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| GateError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TASKGATE_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = lookup("TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(workspace) = lookup("WORKSPACE_ID") {
            self.api.workspace_id = workspace;
        }
        if let Some(timeout) = lookup("TIMEOUT_SECS") {
            self.api.timeout_secs = timeout.parse().map_err(|_| {
                GateError::Config(format!("{}TIMEOUT_SECS must be an integer", ENV_PREFIX))
            })?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logging.json = matches!(json.as_str(), "1" | "true" | "yes");
        }

        Ok(self)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        let sections: [(&str, &dyn Validate); 5] = [
            ("api", &self.api),
            ("serializer", &self.serializer),
            ("batch", &self.batch),
            ("resolver", &self.resolver),
            ("logging", &self.logging),
        ];

        for (name, section) in sections {
            section
                .validate()
                .map_err(|e| GateError::Config(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }
}
