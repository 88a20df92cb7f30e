//! # KVC - Provider Implementations
//!
//! Each provider implements the [`CacheProvider`] port defined in
//! `kvc-domain` and exposes a `register` function for the explicit
//! provider registry.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `RedisCacheProvider` | `cache-redis` | Single-instance Redis server |
//! | `MemoryCacheProvider` | `cache-memory` | In-process store with store semantics |
//! | `NullCacheProvider` | always | Stores nothing |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! kvc-providers = { version = "0.1", default-features = false, features = ["cache-redis"] }
//! ```

// Re-export kvc-domain types commonly used with providers
pub use kvc_domain::error::{Error, Result};
pub use kvc_domain::ports::providers::{CacheProvider, DataProvider};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
pub mod cache;
