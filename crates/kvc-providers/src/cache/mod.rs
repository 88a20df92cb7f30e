//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Testing | Stores nothing, every read misses |
//! | [`MemoryCacheProvider`] | Local | In-process store with expiry, hashes and counters |
//! | [`RedisCacheProvider`] | Remote | Single-instance Redis server |
//!
//! ## Provider Selection Guide
//!
//! - **Disabling the cache**: `NullCacheProvider`
//! - **Tests / single process**: `MemoryCacheProvider`
//! - **Shared cache across processes**: `RedisCacheProvider`

#[cfg(feature = "cache-memory")]
pub mod memory;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

// Re-export for convenience
#[cfg(feature = "cache-memory")]
pub use memory::MemoryCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::{RedisCacheProvider, RedisSettings};

use kvc_application::registry::CacheProviderRegistry;

/// Register every provider compiled into this crate
pub fn register_builtin(registry: &mut CacheProviderRegistry) {
    null::register(registry);
    #[cfg(feature = "cache-memory")]
    memory::register(registry);
    #[cfg(feature = "cache-redis")]
    redis::register(registry);
}
