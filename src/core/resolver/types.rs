//! Resolver types

use super::matching::{MatchResult, ScoredCandidate};
use serde::Serialize;
use std::fmt;

/// Where to look for a name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// One container, given by id or by name
    Container(String),
    /// Every container reachable from the workspace root
    Workspace,
}

impl SearchScope {
    /// Scope from an optional container argument
    pub fn from_container(container: Option<impl Into<String>>) -> Self {
        match container {
            Some(container) => SearchScope::Container(container.into()),
            None => SearchScope::Workspace,
        }
    }

    /// Prefix used for lookup cache keys
    pub(crate) fn cache_prefix(&self) -> String {
        match self {
            SearchScope::Container(container) => format!("container:{}", container),
            SearchScope::Workspace => "workspace".to_string(),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::Container(container) => write!(f, "container '{}'", container),
            SearchScope::Workspace => f.write_str("workspace"),
        }
    }
}

/// A name resolved to an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub id: String,
    /// Name of the matched entity, or the search term when served from cache
    pub name: String,
    pub container_id: Option<String>,
    /// Absent when the id came from the lookup cache
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
    pub from_cache: bool,
}

impl Resolution {
    pub(crate) fn cached(search: &str, id: String) -> Self {
        Self {
            id,
            name: search.to_string(),
            container_id: None,
            match_result: None,
            from_cache: true,
        }
    }
}

impl From<ScoredCandidate> for Resolution {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            id: candidate.entity.id,
            name: candidate.entity.name,
            container_id: candidate.container_id,
            match_result: Some(candidate.result),
            from_cache: false,
        }
    }
}
