//! Error extension utilities
//!
//! Attaches context to errors from figment, toml and std::io while
//! converting them into the domain [`Error`].

use kvc_domain::error::{Error, Result};
use std::fmt;

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use kvc_infrastructure::error_ext::ErrorContext;
///
/// let raw = std::fs::read_to_string(&path)
///     .with_config_context(|| format!("Failed to read {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Convert to a configuration error prefixed with `context`
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Like [`ErrorContext::config_context`], building the context lazily
    fn with_config_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::configuration_with_source(format!("{context}: {err}"), err))
    }

    fn with_config_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|err| Error::configuration_with_source(format!("{}: {err}", f()), err))
    }
}
