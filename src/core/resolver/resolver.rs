//! Name resolution against the remote API

use super::matching::{ScoredCandidate, rank_candidates};
use super::types::{Resolution, SearchScope};
use crate::config::{AmbiguityPolicy, ResolverConfig};
use crate::core::lookup_cache::LookupCache;
use crate::core::remote::{NamedEntity, TaskApi};
use crate::core::serializer::RequestSerializer;
use crate::utils::error::{GateError, Result};
use futures::future::join_all;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves human-typed names to ids
///
/// Every remote call goes through the shared [`RequestSerializer`]; successful
/// resolutions are memoized in the [`LookupCache`].
pub struct NameResolver {
    api: Arc<dyn TaskApi>,
    serializer: Arc<RequestSerializer>,
    cache: Arc<LookupCache>,
    workspace_id: String,
    id_pattern: Regex,
    ambiguity: AmbiguityPolicy,
}

impl NameResolver {
    pub fn new(
        api: Arc<dyn TaskApi>,
        serializer: Arc<RequestSerializer>,
        cache: Arc<LookupCache>,
        workspace_id: impl Into<String>,
        config: &ResolverConfig,
    ) -> Result<Self> {
        let id_pattern = Regex::new(&config.id_pattern)
            .map_err(|e| GateError::Config(format!("invalid id_pattern: {}", e)))?;

        Ok(Self {
            api,
            serializer,
            cache,
            workspace_id: workspace_id.into(),
            id_pattern,
            ambiguity: config.ambiguity,
        })
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    /// Resolve `name` to an id within `scope`
    pub async fn resolve(&self, name: &str, scope: &SearchScope) -> Result<Resolution> {
        if name.trim().is_empty() {
            return Err(GateError::Validation("name must not be empty".to_string()));
        }

        let key = format!("{}::{}", scope.cache_prefix(), name);
        if let Some(id) = self.cache.get(&key) {
            return Ok(Resolution::cached(name, id));
        }

        let best = match scope {
            SearchScope::Container(container) => {
                let container_id = self.resolve_container(container).await?;
                let items = self.fetch_items(&container_id).await?;
                let mut ranked = rank_candidates(name, &items);
                for candidate in &mut ranked {
                    candidate.container_id = Some(container_id.clone());
                }
                self.pick(name, scope, ranked)?
            }
            SearchScope::Workspace => {
                let ranked = self.scan_workspace(name).await?;
                self.pick(name, scope, ranked)?
            }
        };

        info!(
            "Resolved '{}' in {} to {} ({})",
            name, scope, best.entity.id, best.result.reason
        );
        self.cache.set(key, best.entity.id.clone());
        Ok(Resolution::from(best))
    }

    /// Resolve a container reference to its id
    ///
    /// References that look like ids are returned without a remote call.
    pub async fn resolve_container(&self, name_or_id: &str) -> Result<String> {
        let reference = name_or_id.trim();
        if reference.is_empty() {
            return Err(GateError::Validation(
                "container must not be empty".to_string(),
            ));
        }
        if self.id_pattern.is_match(reference) {
            return Ok(reference.to_string());
        }

        let key = format!("containers::{}", name_or_id);
        if let Some(id) = self.cache.get(&key) {
            return Ok(id);
        }

        let containers = self.fetch_containers().await?;
        let scope = SearchScope::Workspace;
        let best = self.pick(reference, &scope, rank_candidates(reference, &containers))?;

        debug!("Container '{}' resolved to {}", reference, best.entity.id);
        self.cache.set(key, best.entity.id.clone());
        Ok(best.entity.id)
    }

    async fn scan_workspace(&self, name: &str) -> Result<Vec<ScoredCandidate>> {
        let containers = self.fetch_containers().await?;
        if containers.is_empty() {
            return Ok(Vec::new());
        }

        // All listings are queued at once; the serializer paces them
        let listings = join_all(containers.iter().map(|c| self.fetch_items(&c.id))).await;

        let mut failures = 0;
        let mut last_error = None;
        let mut ranked = Vec::new();
        for (container, listing) in containers.iter().zip(listings) {
            match listing {
                Ok(items) => {
                    ranked.extend(rank_candidates(name, &items).into_iter().map(|mut c| {
                        c.container_id = Some(container.id.clone());
                        c
                    }));
                }
                Err(e) => {
                    warn!("Skipping container {} ({}): {}", container.id, container.name, e);
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        if failures == containers.len() {
            let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
            return Err(GateError::Network(format!(
                "all {} containers failed to list: {}",
                failures, cause
            )));
        }

        ranked.sort_by(ScoredCandidate::ranking);
        Ok(ranked)
    }

    fn pick(
        &self,
        name: &str,
        scope: &SearchScope,
        ranked: Vec<ScoredCandidate>,
    ) -> Result<ScoredCandidate> {
        let mut ranked = ranked.into_iter();
        let best = ranked
            .next()
            .ok_or_else(|| GateError::NotFound(format!("no match for '{}' in {}", name, scope)))?;

        let tied: Vec<ScoredCandidate> = ranked.take_while(|c| c.ties_with(&best)).collect();
        if tied.is_empty() {
            return Ok(best);
        }

        let candidates: Vec<String> = std::iter::once(&best)
            .chain(tied.iter())
            .map(|c| format!("{} ({})", c.entity.name, c.entity.id))
            .collect();
        match self.ambiguity {
            AmbiguityPolicy::PickFirst => {
                warn!(
                    "'{}' matched {} candidates equally, using {}",
                    name,
                    candidates.len(),
                    best.entity.id
                );
                Ok(best)
            }
            AmbiguityPolicy::Reject => Err(GateError::Ambiguous {
                term: name.to_string(),
                candidates,
            }),
        }
    }

    async fn fetch_containers(&self) -> Result<Vec<NamedEntity>> {
        let api = Arc::clone(&self.api);
        let workspace_id = self.workspace_id.clone();
        self.serializer
            .submit(move || {
                let api = Arc::clone(&api);
                let workspace_id = workspace_id.clone();
                async move { api.list_containers(&workspace_id).await }
            })
            .await
    }

    async fn fetch_items(&self, container_id: &str) -> Result<Vec<NamedEntity>> {
        let api = Arc::clone(&self.api);
        let container_id = container_id.to_string();
        self.serializer
            .submit(move || {
                let api = Arc::clone(&api);
                let container_id = container_id.clone();
                async move { api.list_items(&container_id).await }
            })
            .await
    }
}

impl std::fmt::Debug for NameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver")
            .field("workspace_id", &self.workspace_id)
            .field("id_pattern", &self.id_pattern.as_str())
            .field("ambiguity", &self.ambiguity)
            .finish_non_exhaustive()
    }
}
