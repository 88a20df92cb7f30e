//! Main application configuration

use crate::config::types::LoggingConfig;
use crate::constants::DEFAULT_CACHE_PROVIDER;
use kvc_application::CacheProviderConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Cache provider selection and options
    pub cache: CacheProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            cache: CacheProviderConfig::new(DEFAULT_CACHE_PROVIDER),
        }
    }
}
