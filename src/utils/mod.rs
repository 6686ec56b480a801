//! Utility modules
//!
//! - **error**: Error types and the error kind taxonomy
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
