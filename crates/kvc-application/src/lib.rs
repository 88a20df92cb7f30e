//! # KVC Application Layer
//!
//! Wires cache providers to configuration:
//!
//! - [`registry::CacheProviderConfig`] - flat string-keyed provider settings
//! - [`registry::CacheProviderRegistry`] - name → factory lookup, populated
//!   explicitly by the host application at startup

pub mod registry;

pub use registry::{CacheProviderConfig, CacheProviderEntry, CacheProviderRegistry};
