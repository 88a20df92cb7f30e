//! In-memory cache provider
//!
//! Process-local store that follows the same rules as the Redis provider:
//! lazy expiry, hashes as a second value type, integer counters stored as
//! text, and atomic increment-with-expiry. Useful for tests and
//! single-process deployments.
//!
//! ## Example
//!
//! ```ignore
//! use kvc_providers::cache::MemoryCacheProvider;
//!
//! let provider = MemoryCacheProvider::new();
//! provider.write(&ctx, "greeting", "hello").await;
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use kvc_application::registry::{CacheProviderConfig, CacheProviderRegistry};
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::providers::CacheProvider;
use kvc_domain::value_objects::{Expiry, OpContext, RawCommand, Reply};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use crate::constants::MEMORY_PROVIDER_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredValue {
    Text(String),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl Entry {
    fn text(value: impl Into<String>, expires_at: Option<Instant>) -> Self {
        Self {
            value: StoredValue::Text(value.into()),
            expires_at,
        }
    }

    fn hash() -> Self {
        Self {
            value: StoredValue::Hash(HashMap::new()),
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

fn wrong_type() -> Error {
    Error::provider("WRONGTYPE Operation against a key holding the wrong kind of value")
}

fn expires_at(expiry: Expiry, now: Instant) -> Option<Instant> {
    expiry.duration().and_then(|d| now.checked_add(d))
}

/// In-process cache provider
///
/// State lives in a sharded `DashMap`; multi-step operations on one key
/// (increment plus expiry, hash updates) run under that key's shard lock.
#[derive(Debug, Default)]
pub struct MemoryCacheProvider {
    entries: DashMap<String, Entry>,
    closed: AtomicBool,
}

impl MemoryCacheProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    /// True when no live keys remain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining lifetime of `key`; `None` if absent or persistent
    pub fn time_to_live(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.with_live(key, |e| e.expires_at.map(|at| at.saturating_duration_since(now)))
            .flatten()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }

    /// Apply `f` to the live entry at `key`, evicting it if it has expired
    fn with_live<T>(&self, key: &str, f: impl FnOnce(&Entry) -> T) -> Option<T> {
        let now = Instant::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(now) {
                return Some(f(entry.value()));
            }
        }
        self.entries.remove_if(key, |_, e| e.is_expired(now));
        None
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn try_exists(&self, ctx: &OpContext, key: &str) -> Result<bool> {
        ctx.run(async {
            self.ensure_open()?;
            Ok(self.with_live(key, |_| ()).is_some())
        })
        .await
    }

    async fn try_read(&self, ctx: &OpContext, key: &str) -> Result<Option<String>> {
        ctx.run(async {
            self.ensure_open()?;
            self.with_live(key, |e| match &e.value {
                StoredValue::Text(value) => Ok(Some(value.clone())),
                StoredValue::Hash(_) => Err(wrong_type()),
            })
            .unwrap_or(Ok(None))
        })
        .await
    }

    async fn try_write(
        &self,
        ctx: &OpContext,
        key: &str,
        value: &str,
        expiry: Expiry,
    ) -> Result<()> {
        ctx.run(async {
            self.ensure_open()?;
            let entry = Entry::text(value, expires_at(expiry, Instant::now()));
            self.entries.insert(key.to_string(), entry);
            Ok(())
        })
        .await
    }

    async fn try_delete(&self, ctx: &OpContext, keys: &[&str]) -> Result<u64> {
        ctx.run(async {
            self.ensure_open()?;
            let now = Instant::now();
            let removed = keys
                .iter()
                .filter_map(|key| self.entries.remove(*key))
                .filter(|(_, entry)| !entry.is_expired(now))
                .count();
            Ok(removed as u64)
        })
        .await
    }

    async fn try_hash_set(
        &self,
        ctx: &OpContext,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<()> {
        ctx.run(async {
            self.ensure_open()?;
            let now = Instant::now();
            let mut entry = self
                .entries
                .entry(key.to_string())
                .or_insert_with(Entry::hash);
            if entry.is_expired(now) {
                *entry = Entry::hash();
            }
            match &mut entry.value {
                StoredValue::Hash(map) => {
                    map.insert(field.to_string(), value.to_string());
                    Ok(())
                }
                StoredValue::Text(_) => Err(wrong_type()),
            }
        })
        .await
    }

    async fn try_hash_get(
        &self,
        ctx: &OpContext,
        key: &str,
        field: &str,
    ) -> Result<Option<String>> {
        ctx.run(async {
            self.ensure_open()?;
            self.with_live(key, |e| match &e.value {
                StoredValue::Hash(map) => Ok(map.get(field).cloned()),
                StoredValue::Text(_) => Err(wrong_type()),
            })
            .unwrap_or(Ok(None))
        })
        .await
    }

    async fn try_hash_get_all(
        &self,
        ctx: &OpContext,
        key: &str,
    ) -> Result<HashMap<String, String>> {
        ctx.run(async {
            self.ensure_open()?;
            self.with_live(key, |e| match &e.value {
                StoredValue::Hash(map) => Ok(map.clone()),
                StoredValue::Text(_) => Err(wrong_type()),
            })
            .unwrap_or_else(|| Ok(HashMap::new()))
        })
        .await
    }

    async fn try_hash_delete(&self, ctx: &OpContext, key: &str, fields: &[&str]) -> Result<u64> {
        ctx.run(async {
            self.ensure_open()?;
            let now = Instant::now();
            let mut removed = 0;
            if let Some(mut entry) = self.entries.get_mut(key) {
                if !entry.is_expired(now) {
                    let StoredValue::Hash(map) = &mut entry.value else {
                        return Err(wrong_type());
                    };
                    removed = fields.iter().filter(|f| map.remove(**f).is_some()).count();
                }
            }
            // A hash without fields, or an expired key, no longer exists
            self.entries.remove_if(key, |_, e| {
                e.is_expired(now) || matches!(&e.value, StoredValue::Hash(map) if map.is_empty())
            });
            Ok(removed as u64)
        })
        .await
    }

    async fn try_hash_exists(&self, ctx: &OpContext, key: &str, field: &str) -> Result<bool> {
        ctx.run(async {
            self.ensure_open()?;
            self.with_live(key, |e| match &e.value {
                StoredValue::Hash(map) => Ok(map.contains_key(field)),
                StoredValue::Text(_) => Err(wrong_type()),
            })
            .unwrap_or(Ok(false))
        })
        .await
    }

    async fn try_increment_by_with_expiry(
        &self,
        ctx: &OpContext,
        key: &str,
        delta: i64,
        expiry: Expiry,
    ) -> Result<i64> {
        ctx.run(async {
            self.ensure_open()?;
            let now = Instant::now();
            let mut entry = self
                .entries
                .entry(key.to_string())
                .or_insert_with(|| Entry::text("0", None));
            if entry.is_expired(now) {
                *entry = Entry::text("0", None);
            }

            // Validate before touching anything so a failure leaves value and TTL as they were
            let current = match &entry.value {
                StoredValue::Text(raw) => raw
                    .parse::<i64>()
                    .map_err(|_| Error::provider("value is not an integer or out of range"))?,
                StoredValue::Hash(_) => return Err(wrong_type()),
            };
            let next = current
                .checked_add(delta)
                .ok_or_else(|| Error::provider("increment or decrement would overflow"))?;

            entry.value = StoredValue::Text(next.to_string());
            if let Some(at) = expires_at(expiry, now) {
                entry.expires_at = Some(at);
            }
            Ok(next)
        })
        .await
    }

    async fn try_script_eval(
        &self,
        _ctx: &OpContext,
        _script: &str,
        _keys: &[&str],
        _args: &[&str],
    ) -> Result<Reply> {
        Err(Error::unsupported("script_eval"))
    }

    async fn raw_operate(&self, _ctx: &OpContext, command: RawCommand) -> Result<Reply> {
        Err(Error::unsupported(format!("raw command {}", command.name())))
    }

    async fn ping(&self, ctx: &OpContext) -> Result<()> {
        ctx.run(async { self.ensure_open() }).await
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.entries.clear();
        }
    }

    fn provider_name(&self) -> &str {
        MEMORY_PROVIDER_NAME
    }
}

/// Register the in-memory provider
pub fn register(registry: &mut CacheProviderRegistry) {
    registry.register(
        MEMORY_PROVIDER_NAME,
        "In-process cache (not shared between processes)",
        |_config: CacheProviderConfig| async {
            Ok(Arc::new(MemoryCacheProvider::new()) as Arc<dyn CacheProvider>)
        },
    );
}
