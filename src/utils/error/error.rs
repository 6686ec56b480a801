//! Error handling for taskgate
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

use super::kind::ErrorKind;
use crate::core::remote::RateLimitDetails;
use thiserror::Error;

/// Result type alias for taskgate
pub type Result<T> = std::result::Result<T, GateError>;

/// Main error type for taskgate
#[derive(Error, Debug)]
pub enum GateError {
    /// Remote quota rejection, with whatever quota data the response carried
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        details: RateLimitDetails,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// Several candidates tied and the resolver was told not to guess
    #[error("Ambiguous match for '{term}': {candidates:?}")]
    Ambiguous {
        term: String,
        candidates: Vec<String>,
    },

    /// Item never started because an earlier batch failed
    #[error("Aborted: {0}")]
    Aborted(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The serializer worker is gone
    #[error("Request queue closed: {0}")]
    QueueClosed(String),

    #[error("Unknown error: {0}")]
    Unknown(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GateError {
    /// Build a rate limit error without quota data
    pub fn rate_limited(message: impl Into<String>) -> Self {
        GateError::RateLimit {
            message: message.into(),
            details: RateLimitDetails::default(),
        }
    }

    /// Taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::RateLimit { .. } => ErrorKind::RateLimit,
            GateError::NotFound(_) => ErrorKind::NotFound,
            GateError::Unauthorized(_) => ErrorKind::Unauthorized,
            GateError::Validation(_) | GateError::Config(_) | GateError::Ambiguous { .. } => {
                ErrorKind::Validation
            }
            GateError::Server { .. } => ErrorKind::ServerError,
            GateError::Network(_) => ErrorKind::NetworkError,
            GateError::HttpClient(e) => match e.status() {
                Some(status) => ErrorKind::from_status(status.as_u16()),
                None => ErrorKind::NetworkError,
            },
            GateError::Aborted(_)
            | GateError::QueueClosed(_)
            | GateError::Unknown(_)
            | GateError::Serialization(_)
            | GateError::Yaml(_)
            | GateError::Io(_) => ErrorKind::Unknown,
        }
    }

    /// Quota details when this is a rate limit error
    pub fn rate_limit_details(&self) -> Option<&RateLimitDetails> {
        match self {
            GateError::RateLimit { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Whether the error is a 429-style rejection
    pub fn is_rate_limit(&self) -> bool {
        self.kind() == ErrorKind::RateLimit
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimit | ErrorKind::ServerError | ErrorKind::NetworkError
        )
    }

    /// Build the error matching an HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match ErrorKind::from_status(status) {
            ErrorKind::RateLimit => GateError::rate_limited(message),
            ErrorKind::NotFound => GateError::NotFound(message),
            ErrorKind::Unauthorized => GateError::Unauthorized(message),
            ErrorKind::Validation => GateError::Validation(message),
            ErrorKind::ServerError => GateError::Server { status, message },
            ErrorKind::NetworkError => GateError::Network(message),
            ErrorKind::Unknown => GateError::Unknown(format!("HTTP {}: {}", status, message)),
        }
    }
}
