//! Configuration data types

pub mod app;
pub mod logging;

pub use app::AppConfig;
pub use logging::LoggingConfig;
