//! # taskgate
//!
//! Rate-limit-aware access layer for a task-management API.
//!
//! ## Features
//!
//! - **Adaptive request serializer**: a single FIFO queue per client that spaces
//!   calls according to the quota headers the API reports and retries once on 429
//! - **Batch processor**: sequential batches with bounded concurrency and per-item
//!   retry with exponential backoff
//! - **Name resolver**: tiered fuzzy matching of human-typed names, emoji and case
//!   insensitive, within a container or across the workspace
//! - **Lookup cache**: TTL memo of resolved ids
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taskgate::{Config, ServiceContext};
//! use taskgate::core::resolver::SearchScope;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("taskgate.yaml").await?;
//!     let context = ServiceContext::connect(config)?;
//!
//!     let task = context.resolve("🚀 launch plan", &SearchScope::Workspace).await?;
//!     println!("{} -> {}", task.name, task.id);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::ServiceContext;
pub use utils::error::{ErrorKind, GateError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information stamped by the build script
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Unix seconds
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("TASKGATE_BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("TASKGATE_GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("TASKGATE_RUSTC").unwrap_or("unknown"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
