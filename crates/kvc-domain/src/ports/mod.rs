//! Domain Port Interfaces
//!
//! Ports define the contracts the provider layer implements:
//! - High-level callers depend on these traits only
//! - `kvc-providers` supplies the store-backed implementations
//!
//! ## Organization
//!
//! - **providers/** - cache backends and caller-supplied data sources

/// External service provider ports
pub mod providers;

pub use providers::{CacheProvider, DataProvider};
