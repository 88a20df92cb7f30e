//! Provider Constants
//!
//! Constants specific to provider implementations. Domain-wide values
//! (the no-data sentinel, expiry granularity) live in `kvc_domain::constants`.

// ============================================================================
// PROVIDER NAMES
// ============================================================================

/// Registry name of the Redis provider
pub const REDIS_PROVIDER_NAME: &str = "redis";

/// Registry name of the in-memory provider
pub const MEMORY_PROVIDER_NAME: &str = "memory";

/// Registry name of the null provider
pub const NULL_PROVIDER_NAME: &str = "null";

// ============================================================================
// REDIS CONSTANTS
// ============================================================================

/// Default logical database index
pub const REDIS_DEFAULT_DATABASE: i64 = 0;

/// Option keys understood by the Redis provider
pub const OPTION_HOST: &str = "host";
/// Port option key
pub const OPTION_PORT: &str = "port";
/// Database index option key
pub const OPTION_DATABASE: &str = "database";
/// ACL username option key
pub const OPTION_USERNAME: &str = "username";
/// Password option key
pub const OPTION_PASSWORD: &str = "password";
/// Construction-time liveness check option key
pub const OPTION_PING: &str = "ping";

/// Increment and expiry applied in one server-side step
///
/// `INCRBY` raises on a non-integer value or overflow, which aborts the
/// script before `PEXPIRE` runs.
pub const INCR_WITH_EXPIRY_SCRIPT: &str = r"
local value = redis.call('INCRBY', KEYS[1], ARGV[1])
redis.call('PEXPIRE', KEYS[1], ARGV[2])
return value
";
