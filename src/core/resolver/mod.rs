//! Fuzzy name resolution
//!
//! Maps names typed by a person ("🚀 launch plan") to entity ids using a
//! tiered matching cascade, within one container or across the workspace.

mod matching;
mod normalize;
mod resolver;
mod types;


pub use matching::{MatchReason, MatchResult, ScoredCandidate, rank_candidates, score_candidate, select_best};
pub use normalize::{is_decoration, strip_decorations};
pub use resolver::NameResolver;
pub use types::{Resolution, SearchScope};
