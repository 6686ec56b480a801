//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use url::Url;

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid API base URL '{}': {}", self.base_url, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("API timeout must be greater than 0".to_string());
        }

        if matches!(&self.token, Some(token) if token.trim().is_empty()) {
            return Err("API token must not be blank when set".to_string());
        }

        Ok(())
    }
}

impl Validate for SerializerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_proactive_spacing_ms < self.default_spacing_ms {
            return Err("Proactive spacing cap must be at least the default spacing".to_string());
        }

        if self.max_reactive_spacing_ms < self.max_proactive_spacing_ms {
            return Err("Reactive spacing cap must be at least the proactive cap".to_string());
        }

        if !(self.low_quota_ratio > 0.0 && self.low_quota_ratio < 1.0) {
            return Err("Low quota ratio must be between 0 and 1".to_string());
        }

        if self.min_spacing_factor < 1.0 || self.max_spacing_factor < self.min_spacing_factor {
            return Err(
                "Spacing factors must satisfy 1.0 <= min_spacing_factor <= max_spacing_factor"
                    .to_string(),
            );
        }

        if self.backlog_threshold == 0 {
            return Err("Backlog threshold must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size must be greater than 0".to_string());
        }

        if self.concurrency == 0 {
            return Err("Batch concurrency must be greater than 0".to_string());
        }

        if self.max_retry_delay_ms < self.retry_delay_ms {
            return Err("Maximum retry delay must be at least the retry delay".to_string());
        }

        Ok(())
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cache_ttl_secs == 0 {
            return Err("Lookup cache TTL must be greater than 0".to_string());
        }

        regex::Regex::new(&self.id_pattern)
            .map_err(|e| format!("Invalid id pattern '{}': {}", self.id_pattern, e))?;

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        Ok(())
    }
}
