//! Domain layer constants
//!
//! Values every cache provider must agree on. Infrastructure defaults
//! (config file names, env prefixes) live in `kvc_infrastructure::constants`.

/// Value a [`DataProvider`](crate::DataProvider) returns to mean "the origin
/// had nothing for this key". `read_through` never persists it.
pub const NO_DATA: &str = "null";

/// Smallest expiry the store can represent (millisecond granularity)
pub const MIN_EXPIRY_MILLIS: u64 = 1;

/// Largest expiry handed to a store, `i64::MAX / 2` milliseconds
///
/// Stores add their clock to the relative expiry; the headroom keeps that
/// sum representable. Longer expiries are clamped to this value.
pub const MAX_EXPIRY_MILLIS: u64 = 4_611_686_018_427_387_903;

/// Timeout applied to the construction-time liveness check
pub const DEFAULT_PING_TIMEOUT_SECS: u64 = 5;
