//! Provider bootstrap
//!
//! Builds the registry of providers compiled into this workspace and turns
//! an [`AppConfig`] into a ready [`CacheProvider`].

use crate::config::AppConfig;
use kvc_application::CacheProviderRegistry;
use kvc_domain::error::Result;
use kvc_domain::ports::providers::CacheProvider;
use std::sync::Arc;
use tracing::info;

/// Registry holding every builtin provider (`null`, `memory`, `redis`)
pub fn builtin_registry() -> CacheProviderRegistry {
    let mut registry = CacheProviderRegistry::new();
    kvc_providers::cache::register_builtin(&mut registry);
    registry
}

/// Construct the provider selected by `config.cache`
///
/// Fails when the provider is unknown, its options do not parse, or a
/// requested liveness check does not pass.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn CacheProvider>> {
    let provider = builtin_registry().resolve(&config.cache).await?;
    info!(provider = provider.provider_name(), "Cache ready");
    Ok(provider)
}
