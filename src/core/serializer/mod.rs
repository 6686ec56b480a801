//! Adaptive request serializer
//!
//! Every remote call goes through a per-instance FIFO queue drained by a single
//! worker task. The worker spaces departures according to the quota headers the
//! remote API reports, stretches spacing when the backlog grows, and retries a
//! call exactly once after a 429.
//!
//! Independent serializer instances never share state.

mod call;
mod governor;
mod queue;
mod types;


pub use governor::RateGovernor;
pub use queue::RequestSerializer;
pub use types::RateState;
