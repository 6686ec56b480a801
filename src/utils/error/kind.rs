//! Error taxonomy shared with the remote API client

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of every failure the crate can surface
///
/// The remote client classifies upstream failures into one of these kinds;
/// the serializer, batch processor and resolver pass the kind through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// HTTP 429 or an equivalent quota rejection
    RateLimit,
    /// The requested entity does not exist
    NotFound,
    /// Missing or rejected credentials
    Unauthorized,
    /// The request or local setup was malformed
    Validation,
    /// The remote service failed (5xx)
    ServerError,
    /// Transport failure, timeout, or every scanned container failing
    NetworkError,
    /// Anything the client could not classify
    Unknown,
}

impl ErrorKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Validation => "validation",
            ErrorKind::ServerError => "server_error",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => ErrorKind::RateLimit,
            404 => ErrorKind::NotFound,
            401 | 403 => ErrorKind::Unauthorized,
            400 | 409 | 422 => ErrorKind::Validation,
            500..=599 => ErrorKind::ServerError,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
