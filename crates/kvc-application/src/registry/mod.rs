//! Provider Registry System
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Host builds:      let mut registry = Registry::new()        │
//! │                              ↓                                  │
//! │  2. Providers add:    registry.register("redis", .., factory)   │
//! │                              ↓                                  │
//! │  3. Config selects:   provider = "redis"                        │
//! │                              ↓                                  │
//! │  4. Resolver builds:  registry.resolve(&config).await           │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use kvc_application::registry::{CacheProviderConfig, CacheProviderRegistry};
//!
//! let mut registry = CacheProviderRegistry::new();
//! kvc_providers::cache::register_builtin(&mut registry);
//!
//! let config = CacheProviderConfig::new("redis")
//!     .with_option("host", "127.0.0.1")
//!     .with_option("port", "6379");
//! let provider = registry.resolve(&config).await?;
//! ```

pub mod cache;
pub mod config;

pub use cache::{CacheProviderEntry, CacheProviderFactory, CacheProviderRegistry};
pub use config::CacheProviderConfig;
