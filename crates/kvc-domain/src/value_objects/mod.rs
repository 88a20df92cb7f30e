//! Value objects shared between providers and their callers

pub mod command;
pub mod context;
pub mod expiry;
pub mod reply;

pub use command::RawCommand;
pub use context::OpContext;
pub use expiry::Expiry;
pub use reply::Reply;
