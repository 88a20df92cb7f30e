//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheProvider | Backing-store cache operations |
//! | DataProvider | Authoritative source consulted on a cache miss |

/// Cache provider port
pub mod cache;
/// Data provider port
pub mod data;

// Re-export provider ports for convenience
pub use cache::CacheProvider;
pub use data::DataProvider;
