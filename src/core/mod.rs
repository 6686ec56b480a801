//! Core functionality
//!
//! The request serializer, batch processor, name resolver and lookup cache,
//! plus the remote API they sit on.

pub mod batch;
mod context;
pub mod lookup_cache;
pub mod remote;
pub mod resolver;
pub mod serializer;

pub use context::ServiceContext;
