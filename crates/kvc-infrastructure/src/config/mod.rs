//! Application configuration
//!
//! Sources, lowest precedence first:
//!
//! 1. `AppConfig::default()`
//! 2. TOML file (`kvc.toml`, `config/kvc.toml`, or an explicit path)
//! 3. `KVC_` environment variables, `__` between nested keys
//!    (`KVC_CACHE__OPTIONS__HOST=10.0.0.5`)

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig};
