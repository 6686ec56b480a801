//! Remote task API collaborator
//!
//! The trait the resolver talks to, the response/quota types every remote call
//! produces, and an HTTP implementation.

mod api;
pub mod headers;
mod http;
mod types;

pub use api::TaskApi;
pub use http::HttpTaskApi;
pub use types::{NamedEntity, QuotaSnapshot, RateLimitDetails, RemoteResponse};
