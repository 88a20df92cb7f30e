//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "kvc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "kvc";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "KVC";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Provider used when the configuration names none
pub const DEFAULT_CACHE_PROVIDER: &str = "memory";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "KVC_LOG";

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "kvc";
