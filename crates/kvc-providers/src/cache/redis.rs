//! Redis cache provider
//!
//! Cache implementation backed by a single Redis server.
//!
//! ## Features
//!
//! - One shared [`ConnectionManager`] per provider (multiplexed, reconnects on its own)
//! - Lazy connect: an unreachable server degrades to misses until it comes back
//! - Optional liveness check at construction (`ping = true`)
//! - Increment-with-expiry as a single server-side script
//!
//! ## Configuration
//!
//! | Option | Meaning | Required |
//! |--------|---------|----------|
//! | `host` | server address | yes |
//! | `port` | server port | yes |
//! | `database` | logical database index (default 0) | no |
//! | `username` | ACL user | no |
//! | `password` | credential | when auth is enabled |
//! | `ping` | check liveness at construction, fail on error | no |
//!
//! ## Example
//!
//! ```ignore
//! use kvc_providers::cache::{RedisCacheProvider, RedisSettings};
//!
//! let settings = RedisSettings::new("127.0.0.1", 6379).with_ping(true);
//! let provider = RedisCacheProvider::connect(settings).await?;
//! ```

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use kvc_application::registry::{CacheProviderConfig, CacheProviderRegistry};
use kvc_domain::constants::{DEFAULT_PING_TIMEOUT_SECS, MAX_EXPIRY_MILLIS};
use kvc_domain::error::{Error, Result};
use kvc_domain::ports::providers::CacheProvider;
use kvc_domain::value_objects::{Expiry, OpContext, RawCommand, Reply};
use redis::aio::ConnectionManager;
use redis::{Client, RedisError, Script, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::constants::{
    INCR_WITH_EXPIRY_SCRIPT, OPTION_DATABASE, OPTION_HOST, OPTION_PASSWORD, OPTION_PING,
    OPTION_PORT, OPTION_USERNAME, REDIS_DEFAULT_DATABASE, REDIS_PROVIDER_NAME,
};

/// Connection settings for [`RedisCacheProvider`]
#[derive(Clone, PartialEq, Eq)]
pub struct RedisSettings {
    /// Server host name or IP address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Logical database index
    pub database: i64,
    /// ACL username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Verify liveness at construction
    pub ping: bool,
}

impl RedisSettings {
    /// Settings for `host:port`, database 0, no auth, no ping
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            database: REDIS_DEFAULT_DATABASE,
            username: None,
            password: None,
            ping: false,
        }
    }

    /// Select a logical database
    #[must_use]
    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    /// Authenticate with a password (and optional ACL user)
    #[must_use]
    pub fn with_credentials(mut self, username: Option<String>, password: impl Into<String>) -> Self {
        self.username = username;
        self.password = Some(password.into());
        self
    }

    /// Check liveness at construction
    #[must_use]
    pub fn with_ping(mut self, ping: bool) -> Self {
        self.ping = ping;
        self
    }

    /// Parse settings from a provider configuration map
    pub fn from_config(config: &CacheProviderConfig) -> Result<Self> {
        let host = config.require(OPTION_HOST)?.to_string();
        let port = config
            .parse::<u16>(OPTION_PORT)?
            .ok_or_else(|| Error::configuration(format!("redis requires option '{OPTION_PORT}'")))?;
        let database = config
            .parse::<i64>(OPTION_DATABASE)?
            .unwrap_or(REDIS_DEFAULT_DATABASE);
        if database < 0 {
            return Err(Error::configuration(format!(
                "redis database index must not be negative, got {database}"
            )));
        }

        Ok(Self {
            host,
            port,
            database,
            username: config.option(OPTION_USERNAME).map(str::to_string),
            password: config.option(OPTION_PASSWORD).map(str::to_string),
            ping: config.flag(OPTION_PING)?,
        })
    }

    /// `host:port` for logs
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Connection URL with credentials percent-encoded
    pub fn connection_url(&self) -> Result<url::Url> {
        let raw = format!("redis://{}/{}", self.address(), self.database);
        let mut url = url::Url::parse(&raw).map_err(|e| {
            Error::configuration_with_source(format!("invalid redis address '{}'", self.address()), e)
        })?;

        if let Some(password) = &self.password {
            if let Some(username) = &self.username {
                url.set_username(username)
                    .map_err(|()| Error::configuration("redis username cannot be set on this address"))?;
            }
            url.set_password(Some(password))
                .map_err(|()| Error::configuration("redis password cannot be set on this address"))?;
        }
        Ok(url)
    }
}

impl std::fmt::Debug for RedisSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSettings")
            .field("address", &self.address())
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("ping", &self.ping)
            .finish()
    }
}

/// Redis cache provider
///
/// Holds a `Client` plus a lazily established [`ConnectionManager`]. The
/// manager is cloned per call; clones share one multiplexed connection, so
/// the provider is safe for concurrent use without locking on the request
/// path.
pub struct RedisCacheProvider {
    client: Client,
    settings: RedisSettings,
    connection: ArcSwapOption<ConnectionManager>,
    connect_lock: Mutex<()>,
    closed: AtomicBool,
    incr_with_expiry: Script,
}

impl RedisCacheProvider {
    /// Create a provider without touching the network
    ///
    /// Fails only when the settings do not form a valid connection URL.
    pub fn new(settings: RedisSettings) -> Result<Self> {
        let url = settings.connection_url()?;
        let client = Client::open(url.as_str()).map_err(|e| {
            Error::configuration_with_source("Failed to create Redis client", e)
        })?;

        Ok(Self {
            client,
            settings,
            connection: ArcSwapOption::empty(),
            connect_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
            incr_with_expiry: Script::new(INCR_WITH_EXPIRY_SCRIPT),
        })
    }

    /// Create a provider, running the liveness check when `settings.ping` is set
    ///
    /// A failed check is returned as an error; callers treat it as fatal.
    pub async fn connect(settings: RedisSettings) -> Result<Self> {
        let ping = settings.ping;
        let provider = Self::new(settings)?;
        if ping {
            let ctx = OpContext::with_timeout(Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS));
            provider.ping(&ctx).await?;
            info!(server = %provider.settings.address(), "Redis PONG");
        }
        Ok(provider)
    }

    /// Create a provider from a configuration map
    pub async fn from_config(config: &CacheProviderConfig) -> Result<Self> {
        Self::connect(RedisSettings::from_config(config)?).await
    }

    /// Connection settings
    pub fn settings(&self) -> &RedisSettings {
        &self.settings
    }

    /// Get the shared connection, connecting on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed);
        }
        if let Some(conn) = self.connection.load_full() {
            return Ok(conn.as_ref().clone());
        }

        let _guard = self.connect_lock.lock().await;
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed);
        }
        if let Some(conn) = self.connection.load_full() {
            return Ok(conn.as_ref().clone());
        }

        let manager = ConnectionManager::new(self.client.clone())
            .await
            .map_err(|e| transport_error("connect", e))?;
        self.connection.store(Some(Arc::new(manager.clone())));
        debug!(server = %self.settings.address(), "Redis connection established");
        Ok(manager)
    }

    /// Send one command and decode its reply as `T`
    async fn query<T: redis::FromRedisValue>(
        &self,
        ctx: &OpContext,
        operation: &'static str,
        cmd: redis::Cmd,
    ) -> Result<T> {
        ctx.run(async {
            let mut conn = self.connection().await?;
            let reply: T = cmd
                .query_async(&mut conn)
                .await
                .map_err(|e| store_error(operation, e))?;
            Ok(reply)
        })
        .await
    }
}

/// Map a client error to a transport error tagged with the operation
fn transport_error(operation: &str, e: RedisError) -> Error {
    Error::transport_with_source(format!("Redis {operation} failed: {e}"), e)
}

/// False when the request did not get through; true for error replies
/// (WRONGTYPE, ERR ...) and replies that did not decode
fn is_reported_by_server(e: &RedisError) -> bool {
    !(e.is_io_error()
        || e.is_timeout()
        || e.is_connection_dropped()
        || e.is_connection_refusal()
        || e.is_unrecoverable_error())
}

/// Map a command failure to a provider error or a transport error
fn store_error(operation: &str, e: RedisError) -> Error {
    if is_reported_by_server(&e) {
        Error::provider(format!("Redis {operation} rejected: {e}"))
    } else {
        transport_error(operation, e)
    }
}

/// Errors the server reported about the script itself versus getting it there
fn script_error(e: RedisError) -> Error {
    if is_reported_by_server(&e) {
        Error::script(e.to_string())
    } else {
        transport_error("script", e)
    }
}

fn convert_reply(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(i) => Reply::Int(i),
        Value::BulkString(bytes) => Reply::Data(bytes),
        Value::SimpleString(status) => Reply::Status(status),
        Value::Okay => Reply::Okay,
        Value::Double(d) => Reply::Double(d),
        Value::Boolean(b) => Reply::Bool(b),
        Value::VerbatimString { text, .. } => Reply::Data(text.into_bytes()),
        Value::Array(items) | Value::Set(items) => {
            Reply::Array(items.into_iter().map(convert_reply).collect())
        }
        Value::Map(pairs) => Reply::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (convert_reply(k), convert_reply(v)))
                .collect(),
        ),
        Value::Attribute { data, .. } => convert_reply(*data),
        other => Reply::Status(format!("{other:?}")),
    }
}

/// `Expiry::as_millis` is capped at `MAX_EXPIRY_MILLIS`, which fits an `i64`
/// with room left for the server to add its clock
fn expiry_millis(expiry: Expiry) -> Option<i64> {
    expiry
        .as_millis()
        .map(|ms| i64::try_from(ms.min(MAX_EXPIRY_MILLIS)).unwrap_or(i64::MAX / 2))
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn try_exists(&self, ctx: &OpContext, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(key);
        let count: i64 = self.query(ctx, "EXISTS", cmd).await?;
        Ok(count > 0)
    }

    async fn try_read(&self, ctx: &OpContext, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query(ctx, "GET", cmd).await
    }

    async fn try_write(
        &self,
        ctx: &OpContext,
        key: &str,
        value: &str,
        expiry: Expiry,
    ) -> Result<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ms) = expiry_millis(expiry) {
            cmd.arg("PX").arg(ms);
        }
        self.query(ctx, "SET", cmd).await
    }

    async fn try_delete(&self, ctx: &OpContext, keys: &[&str]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        cmd.arg(keys);
        self.query(ctx, "DEL", cmd).await
    }

    async fn try_hash_set(
        &self,
        ctx: &OpContext,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<()> {
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key).arg(field).arg(value);
        let _added: i64 = self.query(ctx, "HSET", cmd).await?;
        Ok(())
    }

    async fn try_hash_get(
        &self,
        ctx: &OpContext,
        key: &str,
        field: &str,
    ) -> Result<Option<String>> {
        let mut cmd = redis::cmd("HGET");
        cmd.arg(key).arg(field);
        self.query(ctx, "HGET", cmd).await
    }

    async fn try_hash_get_all(
        &self,
        ctx: &OpContext,
        key: &str,
    ) -> Result<HashMap<String, String>> {
        let mut cmd = redis::cmd("HGETALL");
        cmd.arg(key);
        self.query(ctx, "HGETALL", cmd).await
    }

    async fn try_hash_delete(&self, ctx: &OpContext, key: &str, fields: &[&str]) -> Result<u64> {
        if fields.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("HDEL");
        cmd.arg(key).arg(fields);
        self.query(ctx, "HDEL", cmd).await
    }

    async fn try_hash_exists(&self, ctx: &OpContext, key: &str, field: &str) -> Result<bool> {
        let mut cmd = redis::cmd("HEXISTS");
        cmd.arg(key).arg(field);
        self.query(ctx, "HEXISTS", cmd).await
    }

    async fn try_increment_by_with_expiry(
        &self,
        ctx: &OpContext,
        key: &str,
        delta: i64,
        expiry: Expiry,
    ) -> Result<i64> {
        let Some(ms) = expiry_millis(expiry) else {
            let mut cmd = redis::cmd("INCRBY");
            cmd.arg(key).arg(delta);
            return self.query(ctx, "INCRBY", cmd).await;
        };

        ctx.run(async {
            let mut conn = self.connection().await?;
            let mut invocation = self.incr_with_expiry.prepare_invoke();
            invocation.key(key).arg(delta).arg(ms);
            let value: i64 = invocation
                .invoke_async(&mut conn)
                .await
                .map_err(|e| store_error("INCRBY+PEXPIRE", e))?;
            Ok(value)
        })
        .await
    }

    async fn try_script_eval(
        &self,
        ctx: &OpContext,
        script: &str,
        keys: &[&str],
        args: &[&str],
    ) -> Result<Reply> {
        ctx.run(async {
            let mut conn = self.connection().await?;
            let script = Script::new(script);
            let mut invocation = script.prepare_invoke();
            for key in keys {
                invocation.key(*key);
            }
            for arg in args {
                invocation.arg(*arg);
            }
            let value: Value = invocation
                .invoke_async(&mut conn)
                .await
                .map_err(script_error)?;
            Ok(convert_reply(value))
        })
        .await
    }

    async fn raw_operate(&self, ctx: &OpContext, command: RawCommand) -> Result<Reply> {
        if !command.is_valid() {
            return Err(Error::invalid_argument("raw command name must not be empty"));
        }
        let mut cmd = redis::cmd(command.name());
        for arg in command.args() {
            cmd.arg(arg.as_slice());
        }
        let value: Value = self.query(ctx, "raw command", cmd).await?;
        Ok(convert_reply(value))
    }

    async fn ping(&self, ctx: &OpContext) -> Result<()> {
        let pong: String = self.query(ctx, "PING", redis::cmd("PING")).await?;
        debug!(server = %self.settings.address(), reply = %pong, "Redis ping");
        Ok(())
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!(server = %self.settings.address(), "Redis provider already closed");
            return;
        }
        // Dropping the last manager clone closes the multiplexed connection
        self.connection.store(None);
        info!(server = %self.settings.address(), "Redis provider closed");
    }

    fn provider_name(&self) -> &str {
        REDIS_PROVIDER_NAME
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.settings.address())
            .field("database", &self.settings.database)
            .field("connected", &self.connection.load().is_some())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

/// Register the Redis provider
pub fn register(registry: &mut CacheProviderRegistry) {
    registry.register(
        REDIS_PROVIDER_NAME,
        "Redis single-instance cache",
        |config: CacheProviderConfig| async move {
            let provider = RedisCacheProvider::from_config(&config).await?;
            Ok(Arc::new(provider) as Arc<dyn CacheProvider>)
        },
    );
}
