//! Cache Provider Port
//!
//! Port for cache backend providers. Implementations supply the fallible
//! `try_*` primitives; this trait layers the public, non-failing surface on
//! top of them:
//!
//! - read-style calls degrade to "absent" (`None`, `false`, empty map)
//! - write-style calls report `false`
//! - every collapsed failure is logged with the operation and key
//!
//! A cache is an optimization: an outage must turn into "always miss" and
//! "writes no-op", never into an error on the caller's data path.
//!
//! Note that the collapsed [`CacheProvider::read`] cannot tell a missing key
//! from a store failure. Callers that need the difference use
//! [`CacheProvider::try_read`].

use crate::constants::NO_DATA;
use crate::error::{Error, Result};
use crate::ports::providers::data::DataProvider;
use crate::value_objects::{Expiry, OpContext, RawCommand, Reply};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Cache Provider Port
///
/// # Implementations
///
/// - **Redis**: single-instance key-value store server
/// - **Memory**: in-process store with the same semantics, for tests and local runs
/// - **Null**: never stores anything
///
/// # Example
///
/// ```ignore
/// use kvc_domain::{CacheProvider, Expiry, OpContext};
///
/// let ctx = OpContext::with_timeout(Duration::from_secs(1));
/// cache.write_with_expiry(&ctx, "session:42", &token, Expiry::from_secs(900)).await;
///
/// if let Some(token) = cache.read(&ctx, "session:42").await {
///     // hit
/// }
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    // ------------------------------------------------------------------
    // Provider primitives
    // ------------------------------------------------------------------

    /// Whether `key` is present and unexpired
    async fn try_exists(&self, ctx: &OpContext, key: &str) -> Result<bool>;

    /// Stored value, `None` if absent or expired
    async fn try_read(&self, ctx: &OpContext, key: &str) -> Result<Option<String>>;

    /// Store `value`; `Expiry::Persistent` clears any previous expiry
    async fn try_write(&self, ctx: &OpContext, key: &str, value: &str, expiry: Expiry)
    -> Result<()>;

    /// Remove keys, returning how many existed
    async fn try_delete(&self, ctx: &OpContext, keys: &[&str]) -> Result<u64>;

    /// Set one field of the hash at `key`
    async fn try_hash_set(&self, ctx: &OpContext, key: &str, field: &str, value: &str)
    -> Result<()>;

    /// One field of the hash at `key`
    async fn try_hash_get(&self, ctx: &OpContext, key: &str, field: &str)
    -> Result<Option<String>>;

    /// Every field of the hash at `key`; empty if the key is absent
    async fn try_hash_get_all(&self, ctx: &OpContext, key: &str)
    -> Result<HashMap<String, String>>;

    /// Remove fields from the hash at `key`, returning how many existed
    async fn try_hash_delete(&self, ctx: &OpContext, key: &str, fields: &[&str]) -> Result<u64>;

    /// Whether the hash at `key` has `field`
    async fn try_hash_exists(&self, ctx: &OpContext, key: &str, field: &str) -> Result<bool>;

    /// Add `delta` to the integer at `key` and apply `expiry` as one atomic unit
    ///
    /// Either both effects land or neither does. A missing key counts from
    /// zero. `Expiry::Persistent` leaves the key's current TTL untouched.
    /// Returns the new counter value.
    async fn try_increment_by_with_expiry(
        &self,
        ctx: &OpContext,
        key: &str,
        delta: i64,
        expiry: Expiry,
    ) -> Result<i64>;

    /// Run a server-side script against `keys` with `args`
    ///
    /// Script failures are reported as [`Error::Script`], distinct from
    /// transport failures.
    async fn try_script_eval(
        &self,
        ctx: &OpContext,
        script: &str,
        keys: &[&str],
        args: &[&str],
    ) -> Result<Reply>;

    /// Forward a raw command to the backing client
    ///
    /// Escape hatch for operations the uniform surface does not expose;
    /// errors are returned as the transport reports them.
    async fn raw_operate(&self, ctx: &OpContext, command: RawCommand) -> Result<Reply>;

    /// Liveness check against the store
    async fn ping(&self, ctx: &OpContext) -> Result<()>;

    /// Release the connection; idempotent, never fails
    ///
    /// Operations issued afterwards behave like transport failures.
    fn close(&self);

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;

    // ------------------------------------------------------------------
    // Public cache surface
    // ------------------------------------------------------------------

    /// True iff the key is present and unexpired; false on any failure
    async fn exists(&self, ctx: &OpContext, key: &str) -> bool {
        collapse(self.provider_name(), "exists", key, self.try_exists(ctx, key).await)
            .unwrap_or(false)
    }

    /// Stored value; `None` if absent, expired, or the store failed
    async fn read(&self, ctx: &OpContext, key: &str) -> Option<String> {
        collapse(self.provider_name(), "read", key, self.try_read(ctx, key).await).flatten()
    }

    /// Store `value` with the store's default retention
    async fn write(&self, ctx: &OpContext, key: &str, value: &str) -> bool {
        self.write_with_expiry(ctx, key, value, Expiry::Persistent)
            .await
    }

    /// Store `value` expiring after `expiry`
    ///
    /// `false` means the value is not guaranteed to be retrievable; callers
    /// may carry on without caching.
    async fn write_with_expiry(
        &self,
        ctx: &OpContext,
        key: &str,
        value: &str,
        expiry: Expiry,
    ) -> bool {
        collapse(
            self.provider_name(),
            "write",
            key,
            self.try_write(ctx, key, value, expiry).await,
        )
        .is_some()
    }

    /// Remove one key; removing a missing key succeeds
    async fn delete(&self, ctx: &OpContext, key: &str) -> bool {
        self.batch_delete(ctx, &[key]).await
    }

    /// Remove many keys; missing keys are ignored
    async fn batch_delete(&self, ctx: &OpContext, keys: &[&str]) -> bool {
        if keys.is_empty() {
            return true;
        }
        let label = keys.join(",");
        collapse(
            self.provider_name(),
            "delete",
            &label,
            self.try_delete(ctx, keys).await,
        )
        .is_some()
    }

    /// Set one hash field
    async fn hash_set(&self, ctx: &OpContext, key: &str, field: &str, value: &str) -> bool {
        collapse(
            self.provider_name(),
            "hash_set",
            key,
            self.try_hash_set(ctx, key, field, value).await,
        )
        .is_some()
    }

    /// One hash field; `None` if the key or field is missing or the store failed
    async fn hash_get(&self, ctx: &OpContext, key: &str, field: &str) -> Option<String> {
        collapse(
            self.provider_name(),
            "hash_get",
            key,
            self.try_hash_get(ctx, key, field).await,
        )
        .flatten()
    }

    /// Every hash field; empty if the key is missing or the store failed
    async fn hash_get_all(&self, ctx: &OpContext, key: &str) -> HashMap<String, String> {
        collapse(
            self.provider_name(),
            "hash_get_all",
            key,
            self.try_hash_get_all(ctx, key).await,
        )
        .unwrap_or_default()
    }

    /// Remove hash fields; missing fields are ignored
    async fn hash_delete(&self, ctx: &OpContext, key: &str, fields: &[&str]) -> bool {
        if fields.is_empty() {
            return true;
        }
        collapse(
            self.provider_name(),
            "hash_delete",
            key,
            self.try_hash_delete(ctx, key, fields).await,
        )
        .is_some()
    }

    /// True iff both the key and the field exist
    async fn hash_exists(&self, ctx: &OpContext, key: &str, field: &str) -> bool {
        collapse(
            self.provider_name(),
            "hash_exists",
            key,
            self.try_hash_exists(ctx, key, field).await,
        )
        .unwrap_or(false)
    }

    /// Increment the counter at `key` by one
    async fn increment(&self, ctx: &OpContext, key: &str) -> bool {
        self.increment_by_with_expiry(ctx, key, 1, Expiry::Persistent)
            .await
    }

    /// Increment by one and set the expiry, atomically
    async fn increment_with_expiry(&self, ctx: &OpContext, key: &str, expiry: Expiry) -> bool {
        self.increment_by_with_expiry(ctx, key, 1, expiry).await
    }

    /// Increment by `delta` and set the expiry, atomically
    async fn increment_by_with_expiry(
        &self,
        ctx: &OpContext,
        key: &str,
        delta: i64,
        expiry: Expiry,
    ) -> bool {
        collapse(
            self.provider_name(),
            "increment",
            key,
            self.try_increment_by_with_expiry(ctx, key, delta, expiry)
                .await,
        )
        .is_some()
    }

    /// Run a server-side script; any failure yields [`Reply::Nil`]
    async fn script_eval(
        &self,
        ctx: &OpContext,
        script: &str,
        keys: &[&str],
        args: &[&str],
    ) -> Reply {
        let label = keys.join(",");
        collapse(
            self.provider_name(),
            "script_eval",
            &label,
            self.try_script_eval(ctx, script, keys, args).await,
        )
        .unwrap_or_default()
    }

    /// Cache-aside read
    ///
    /// 1. Read `key`; a hit is returned as-is.
    /// 2. On a miss, or when the store cannot be reached, ask `source` to
    ///    produce the value.
    /// 3. Unless it is [`NO_DATA`], cache it with `source.preferred_expiry()`.
    /// 4. Return the produced value.
    ///
    /// When the store answers with an error of its own (for example the key
    /// holds a hash), the produced value is returned but never written, so
    /// whatever lives at `key` is left alone.
    ///
    /// Returns `None` only when `source` itself fails or the context ends
    /// before it answers; nothing is cached then.
    async fn read_through(
        &self,
        ctx: &OpContext,
        key: &str,
        source: &dyn DataProvider,
    ) -> Option<String> {
        let cacheable = match self.try_read(ctx, key).await {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {
                debug!(provider = self.provider_name(), key, "Cache miss");
                true
            }
            Err(e) if e.is_transport() || e.is_interrupted() => {
                warn!(
                    provider = self.provider_name(),
                    key,
                    error = %e,
                    "Cache read failed, falling back to data provider"
                );
                true
            }
            Err(e) => {
                warn!(
                    provider = self.provider_name(),
                    key,
                    error = %e,
                    "Cache rejected read, serving data provider value uncached"
                );
                false
            }
        };

        let value = match ctx.run(source.produce(key)).await {
            Ok(value) => value,
            Err(e) => {
                warn!(provider = self.provider_name(), key, error = %e, "Data provider failed");
                return None;
            }
        };

        if value == NO_DATA {
            debug!(provider = self.provider_name(), key, "Origin has no data, not caching");
        } else if cacheable
            && !self
                .write_with_expiry(ctx, key, &value, source.preferred_expiry())
                .await
        {
            debug!(provider = self.provider_name(), key, "Serving uncached value");
        }

        Some(value)
    }
}

/// Turn a provider result into `Some(value)` or log and return `None`
fn collapse<T>(provider: &str, operation: &str, key: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e @ (Error::Cancelled | Error::DeadlineExceeded)) => {
            debug!(provider, operation, key, error = %e, "Cache operation interrupted");
            None
        }
        Err(e) => {
            warn!(provider, operation, key, error = %e, "Cache operation failed");
            None
        }
    }
}
