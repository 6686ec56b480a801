//! Common test utilities for taskgate
//!
//! - In-memory task API with call recording
//! - Workspace fixtures
//! - Custom assertions

pub mod assertions;
pub mod fake_api;
pub mod fixtures;

pub use fake_api::FakeTaskApi;
pub use fixtures::WorkspaceFactory;
