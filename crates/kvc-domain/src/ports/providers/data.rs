//! Data Provider Port
//!
//! The authoritative source behind a cache. `read_through` consults it on a
//! miss and caches what it produces.

use crate::error::Result;
use crate::value_objects::Expiry;
use async_trait::async_trait;

/// Source of truth for values that are not cached yet
///
/// Return [`NO_DATA`](crate::NO_DATA) from `produce` to report "nothing
/// upstream"; that value is handed back to the caller but never cached, so
/// the next read consults the origin again. Callers that want negative
/// caching return their own placeholder instead and choose its expiry.
///
/// # Example
///
/// ```ignore
/// struct UserLoader { db: Db }
///
/// #[async_trait]
/// impl DataProvider for UserLoader {
///     async fn produce(&self, key: &str) -> Result<String> {
///         Ok(self.db.user_json(key).await?.unwrap_or_else(|| NO_DATA.to_string()))
///     }
///
///     fn preferred_expiry(&self) -> Expiry {
///         Expiry::from_secs(300)
///     }
/// }
/// ```
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Produce the authoritative value for `key`
    async fn produce(&self, key: &str) -> Result<String>;

    /// Expiry to attach to a freshly produced value
    fn preferred_expiry(&self) -> Expiry;
}
