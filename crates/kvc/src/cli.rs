//! Command line interface
//!
//! Thin wrapper over the cache surface for poking at a configured store:
//!
//! ```text
//! kvc --config kvc.toml set session:42 token --ttl 900
//! kvc get session:42
//! kvc incr rate:10.0.0.1 --ttl 60
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use kvc_domain::ports::providers::CacheProvider;
use kvc_domain::value_objects::{Expiry, OpContext};
use kvc_infrastructure::config::ConfigLoader;
use kvc_infrastructure::logging::init_logging;
use kvc_infrastructure::{builtin_registry, connect};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Default per-command timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Command line interface for KVC
#[derive(Parser, Debug)]
#[command(name = "kvc")]
#[command(about = "KVC - pluggable cache provider")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds to wait for the store before giving up
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Cache commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check that the store answers
    Ping,
    /// Print the value at KEY
    Get { key: String },
    /// Store VALUE at KEY
    Set {
        key: String,
        value: String,
        /// Expire after this many seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Remove keys
    Del {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Report whether KEY exists
    Exists { key: String },
    /// Increment the counter at KEY and print the new value
    Incr {
        key: String,
        /// Amount to add (may be negative)
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        by: i64,
        /// Expire after this many seconds, applied atomically with the increment
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Print one hash field
    Hget { key: String, field: String },
    /// Set one hash field
    Hset {
        key: String,
        field: String,
        value: String,
    },
    /// Print every field of a hash
    Hgetall { key: String },
    /// Remove hash fields
    Hdel {
        key: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// List the providers this build can construct
    Providers,
}

fn expiry(ttl: Option<u64>) -> Expiry {
    ttl.map_or(Expiry::Persistent, Expiry::from_secs)
}

/// Load configuration, build the provider and run one command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.command == Command::Providers {
        return list_providers(&mut out);
    }

    let cache = connect(&config)
        .await
        .with_context(|| format!("Failed to construct cache provider '{}'", config.cache.provider))?;
    let ctx = OpContext::with_timeout(Duration::from_secs(cli.timeout));

    let result = execute(cache.as_ref(), &ctx, &cli.command, &mut out).await;
    cache.close();
    result
}

/// Run one command against `cache`, writing its output to `out`
pub async fn execute(
    cache: &dyn CacheProvider,
    ctx: &OpContext,
    command: &Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Ping => {
            cache.ping(ctx).await?;
            writeln!(out, "PONG")?;
        }
        Command::Get { key } => match cache.try_read(ctx, key).await? {
            Some(value) => writeln!(out, "{value}")?,
            None => writeln!(out, "(nil)")?,
        },
        Command::Set { key, value, ttl } => {
            if !cache.write_with_expiry(ctx, key, value, expiry(*ttl)).await {
                bail!("write to '{key}' failed");
            }
            writeln!(out, "OK")?;
        }
        Command::Del { keys } => {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            let removed = cache.try_delete(ctx, &keys).await?;
            writeln!(out, "{removed}")?;
        }
        Command::Exists { key } => {
            writeln!(out, "{}", cache.try_exists(ctx, key).await?)?;
        }
        Command::Incr { key, by, ttl } => {
            let value = cache
                .try_increment_by_with_expiry(ctx, key, *by, expiry(*ttl))
                .await?;
            writeln!(out, "{value}")?;
        }
        Command::Hget { key, field } => match cache.try_hash_get(ctx, key, field).await? {
            Some(value) => writeln!(out, "{value}")?,
            None => writeln!(out, "(nil)")?,
        },
        Command::Hset { key, field, value } => {
            if !cache.hash_set(ctx, key, field, value).await {
                bail!("hash write to '{key}' failed");
            }
            writeln!(out, "OK")?;
        }
        Command::Hgetall { key } => {
            let mut fields: Vec<_> = cache.try_hash_get_all(ctx, key).await?.into_iter().collect();
            fields.sort();
            for (field, value) in fields {
                writeln!(out, "{field}={value}")?;
            }
        }
        Command::Hdel { key, fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let removed = cache.try_hash_delete(ctx, key, &fields).await?;
            writeln!(out, "{removed}")?;
        }
        Command::Providers => list_providers(out)?,
    }
    Ok(())
}

fn list_providers(out: &mut impl Write) -> anyhow::Result<()> {
    for (name, description) in builtin_registry().list() {
        writeln!(out, "{name:<8} {description}")?;
    }
    Ok(())
}
