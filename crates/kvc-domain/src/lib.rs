//! # KVC Domain Layer
//!
//! Core types and ports for the pluggable cache provider.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Sentinels and defaults shared by every provider |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`value_objects`] | `Expiry`, `Reply`, `RawCommand`, `OpContext` |
//! | [`ports`] | `CacheProvider` and `DataProvider` traits |
//!
//! Providers implement the fallible `try_*` primitives of
//! [`CacheProvider`](ports::providers::CacheProvider); the trait supplies the
//! non-failing public surface (`read`, `write`, `read_through`, ...) on top.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use constants::NO_DATA;
pub use error::{Error, Result};
pub use ports::providers::{CacheProvider, DataProvider};
pub use value_objects::{Expiry, OpContext, RawCommand, Reply};
