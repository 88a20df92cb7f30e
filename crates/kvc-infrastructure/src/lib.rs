//! # KVC Infrastructure Layer
//!
//! Cross-cutting concerns around the cache providers:
//!
//! - [`config`] - figment-based loading of [`config::AppConfig`]
//! - [`logging`] - tracing subscriber setup
//! - [`bootstrap`] - builtin provider registry and provider construction
//! - [`error_ext`] - context helpers for foreign errors

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{builtin_registry, connect};
pub use config::{AppConfig, ConfigLoader, LoggingConfig};
