//! Null cache provider for testing
//!
//! A cache provider implementation that doesn't store anything.
//! Useful for testing and disabling caching.

use async_trait::async_trait;
use kvc_application::registry::{CacheProviderConfig, CacheProviderRegistry};
use kvc_domain::error::Result;
use kvc_domain::ports::providers::CacheProvider;
use kvc_domain::value_objects::{Expiry, OpContext, RawCommand, Reply};
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::NULL_PROVIDER_NAME;

/// Null cache provider that doesn't store anything
///
/// Reads always miss and writes always succeed without storing the data,
/// so `read_through` consults its data provider on every call.
///
/// # Example
///
/// ```rust
/// use kvc_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn try_exists(&self, _ctx: &OpContext, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn try_read(&self, _ctx: &OpContext, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn try_write(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _value: &str,
        _expiry: Expiry,
    ) -> Result<()> {
        Ok(())
    }

    async fn try_delete(&self, _ctx: &OpContext, _keys: &[&str]) -> Result<u64> {
        Ok(0)
    }

    async fn try_hash_set(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _field: &str,
        _value: &str,
    ) -> Result<()> {
        Ok(())
    }

    async fn try_hash_get(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _field: &str,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    async fn try_hash_get_all(
        &self,
        _ctx: &OpContext,
        _key: &str,
    ) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn try_hash_delete(&self, _ctx: &OpContext, _key: &str, _fields: &[&str]) -> Result<u64> {
        Ok(0)
    }

    async fn try_hash_exists(&self, _ctx: &OpContext, _key: &str, _field: &str) -> Result<bool> {
        Ok(false)
    }

    async fn try_increment_by_with_expiry(
        &self,
        _ctx: &OpContext,
        _key: &str,
        delta: i64,
        _expiry: Expiry,
    ) -> Result<i64> {
        // Every counter starts from zero
        Ok(delta)
    }

    async fn try_script_eval(
        &self,
        _ctx: &OpContext,
        _script: &str,
        _keys: &[&str],
        _args: &[&str],
    ) -> Result<Reply> {
        Ok(Reply::Nil)
    }

    async fn raw_operate(&self, _ctx: &OpContext, _command: RawCommand) -> Result<Reply> {
        Ok(Reply::Nil)
    }

    async fn ping(&self, _ctx: &OpContext) -> Result<()> {
        Ok(())
    }

    fn close(&self) {}

    fn provider_name(&self) -> &str {
        NULL_PROVIDER_NAME
    }
}

/// Register the null provider
pub fn register(registry: &mut CacheProviderRegistry) {
    registry.register(
        NULL_PROVIDER_NAME,
        "No-op cache (always misses)",
        |_config: CacheProviderConfig| async {
            Ok(Arc::new(NullCacheProvider::new()) as Arc<dyn CacheProvider>)
        },
    );
}
