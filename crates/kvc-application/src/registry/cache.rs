//! Cache Provider Registry
//!
//! Explicit name → factory registry. The host application creates one at
//! startup, registers the providers it wants, then resolves the configured
//! provider by name. Nothing registers itself as a side effect of linking.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::providers::CacheProvider;
use tracing::{info, warn};

use super::config::CacheProviderConfig;

/// Asynchronous constructor for a provider
///
/// Construction is async because providers may connect and verify liveness
/// before they are handed out.
pub type CacheProviderFactory = Arc<
    dyn Fn(CacheProviderConfig) -> BoxFuture<'static, Result<Arc<dyn CacheProvider>>>
        + Send
        + Sync,
>;

/// Registry entry for cache providers
#[derive(Clone)]
pub struct CacheProviderEntry {
    /// Unique provider name (e.g., "redis", "memory", "null")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create provider instances
    pub factory: CacheProviderFactory,
}

impl std::fmt::Debug for CacheProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheProviderEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name → factory lookup for cache providers
#[derive(Debug, Clone, Default)]
pub struct CacheProviderRegistry {
    entries: BTreeMap<String, CacheProviderEntry>,
}

impl CacheProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider factory under `name`
    ///
    /// Registering an existing name replaces the previous factory.
    pub fn register<F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn(CacheProviderConfig) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn CacheProvider>>> + Send + 'static,
    {
        let name = name.into();
        let factory: CacheProviderFactory = Arc::new(move |config| factory(config).boxed());
        let entry = CacheProviderEntry {
            name: name.clone(),
            description: description.into(),
            factory,
        };

        if self.entries.insert(name.clone(), entry).is_some() {
            warn!(provider = %name, "Cache provider re-registered, previous factory replaced");
        }
        self
    }

    /// Whether a provider is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered entry for `name`
    pub fn get(&self, name: &str) -> Option<&CacheProviderEntry> {
        self.entries.get(name)
    }

    /// List all registered cache providers as (name, description), sorted by name
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.entries
            .values()
            .map(|e| (e.name.as_str(), e.description.as_str()))
            .collect()
    }

    /// Resolve cache provider by name and build it from `config`
    ///
    /// # Returns
    /// * `Ok(Arc<dyn CacheProvider>)` - Created provider instance
    /// * `Err(Error::NotFound)` - No provider registered under the name
    /// * `Err(_)` - Whatever the provider's factory reported
    pub async fn resolve(&self, config: &CacheProviderConfig) -> Result<Arc<dyn CacheProvider>> {
        let Some(entry) = self.entries.get(&config.provider) else {
            let available: Vec<&str> = self.entries.keys().map(String::as_str).collect();
            return Err(Error::not_found(format!(
                "cache provider '{}' (available: {:?})",
                config.provider, available
            )));
        };

        let provider = (entry.factory)(config.clone()).await?;
        info!(provider = %entry.name, "Cache provider created");
        Ok(provider)
    }
}
