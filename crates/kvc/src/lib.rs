//! # KVC
//!
//! A pluggable cache provider: one uniform, non-failing cache surface over
//! interchangeable backends, with a Redis implementation.
//!
//! ## Features
//!
//! - **Uniform surface**: strings, hash fields, counters; failures collapse to misses
//! - **Read-through**: `read_through` populates the cache from a [`domain::DataProvider`]
//! - **Atomic counters**: increment and expiry land together or not at all
//! - **Escape hatches**: typed raw commands and server-side scripts
//! - **Explicit registry**: providers are chosen by name from configuration
//!
//! ## Example
//!
//! ```ignore
//! use kvc::domain::{CacheProvider, Expiry, OpContext};
//! use kvc::infrastructure::{ConfigLoader, connect};
//!
//! let config = ConfigLoader::new().load()?;
//! let cache = connect(&config).await?;
//!
//! let ctx = OpContext::with_timeout(Duration::from_secs(1));
//! cache.increment_with_expiry(&ctx, "rate:10.0.0.1", Expiry::from_secs(60)).await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - provider ports, value objects, errors
//! - `application` - provider registry and provider configuration
//! - `providers` - Redis, in-memory and null implementations
//! - `infrastructure` - configuration, logging, bootstrap

/// Domain layer - ports, value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kvc_domain::*;
}

/// Application layer - provider registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kvc_application::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kvc_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kvc_infrastructure::*;
}

pub mod cli;
