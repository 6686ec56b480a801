//! Service wiring
//!
//! One [`ServiceContext`] owns the serializer, lookup cache and resolver for a
//! workspace. Build it once and pass it by reference.

use crate::config::Config;
use crate::core::batch::{BatchOptions, BatchProcessor, BatchResult};
use crate::core::lookup_cache::LookupCache;
use crate::core::remote::{HttpTaskApi, TaskApi};
use crate::core::resolver::{NameResolver, Resolution, SearchScope};
use crate::core::serializer::RequestSerializer;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Everything needed to talk to one workspace
#[derive(Debug)]
pub struct ServiceContext {
    config: Arc<Config>,
    serializer: Arc<RequestSerializer>,
    cache: Arc<LookupCache>,
    resolver: NameResolver,
}

impl ServiceContext {
    /// Wire the components around `api`
    ///
    /// Must be called inside a Tokio runtime since the serializer spawns its
    /// worker.
    pub fn new(config: Config, api: Arc<dyn TaskApi>) -> Result<Self> {
        let serializer = Arc::new(RequestSerializer::new(config.serializer.clone()));
        let cache = Arc::new(LookupCache::new(config.resolver.cache_ttl()));
        let resolver = NameResolver::new(
            api,
            Arc::clone(&serializer),
            Arc::clone(&cache),
            config.api.workspace_id.clone(),
            &config.resolver,
        )?;

        info!(
            "Service context ready for workspace {}",
            config.api.workspace_id
        );
        Ok(Self {
            config: Arc::new(config),
            serializer,
            cache,
            resolver,
        })
    }

    /// Context backed by the HTTP client built from `config.api`
    pub fn connect(config: Config) -> Result<Self> {
        let api = HttpTaskApi::new(&config.api)?;
        Self::new(config, Arc::new(api))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn serializer(&self) -> &RequestSerializer {
        &self.serializer
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Batch options from the configured defaults
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::from(&self.config.batch)
    }

    pub async fn resolve(&self, name: &str, scope: &SearchScope) -> Result<Resolution> {
        self.resolver.resolve(name, scope).await
    }

    /// Resolve many names, reporting each outcome individually
    pub async fn resolve_many(
        &self,
        names: Vec<String>,
        scope: &SearchScope,
        options: BatchOptions,
    ) -> Result<BatchResult<String, Resolution>> {
        BatchProcessor::new(options)
            .process(names, |name| async move {
                self.resolver.resolve(&name, scope).await
            })
            .await
    }
}
