//! Cache provider configuration
//!
//! Providers receive their settings as a flat string map (`host`, `port`,
//! `database`, ...). Numbers and booleans written natively in TOML or picked
//! up from the environment are stored in their textual form so every
//! provider parses options the same way.

use kvc_domain::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Configuration for cache provider creation
///
/// Contains the provider name plus whatever options that provider needs.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheProviderConfig {
    /// Provider name (e.g., "redis", "memory", "null")
    pub provider: String,
    /// Provider-specific options
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: BTreeMap<String, String>,
}

impl CacheProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            options: BTreeMap::new(),
        }
    }

    /// Create a config from an existing option map
    pub fn from_options<I, K, V>(provider: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            provider: provider.into(),
            options: options
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Add an option
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Raw option value; blank values count as absent
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Option that must be present
    pub fn require(&self, key: &str) -> Result<&str> {
        self.option(key).ok_or_else(|| {
            Error::configuration(format!(
                "cache provider '{}' requires option '{key}'",
                self.provider
            ))
        })
    }

    /// Parse an optional option
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.option(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    Error::configuration(format!("invalid value '{raw}' for option '{key}': {e}"))
                })
            })
            .transpose()
    }

    /// Parse a boolean option, `false` when absent
    ///
    /// Accepts `1/0`, `t/f`, `true/false`, `yes/no`, `on/off` in any case.
    pub fn flag(&self, key: &str) -> Result<bool> {
        let Some(raw) = self.option(key) else {
            return Ok(false);
        };
        match raw.to_ascii_lowercase().as_str() {
            "1" | "t" | "true" | "yes" | "on" => Ok(true),
            "0" | "f" | "false" | "no" | "off" => Ok(false),
            _ => Err(Error::configuration(format!(
                "invalid boolean '{raw}' for option '{key}'"
            ))),
        }
    }
}

/// Scalar accepted for an option value
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    fn into_text(self) -> String {
        match self {
            Self::Bool(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Text(v) => v,
        }
    }
}

fn deserialize_options<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, OptionValue>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into_text())).collect())
}
