//! Unit tests for CLI parsing and command execution

use clap::Parser;
use kvc::cli::{Cli, Command, DEFAULT_TIMEOUT_SECS, execute};
use kvc::domain::OpContext;
use kvc::providers::cache::MemoryCacheProvider;

async fn run(cache: &MemoryCacheProvider, args: &[&str]) -> String {
    let cli = Cli::try_parse_from(std::iter::once("kvc").chain(args.iter().copied())).unwrap();
    let mut out = Vec::new();
    execute(cache, &OpContext::background(), &cli.command, &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from(["kvc", "--config", "kvc.toml", "--timeout", "2", "ping"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("kvc.toml")));
    assert_eq!(cli.timeout, 2);
    assert_eq!(cli.command, Command::Ping);

    let cli = Cli::try_parse_from(["kvc", "get", "k"]).unwrap();
    assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_parse_rejects_missing_arguments() {
    assert!(Cli::try_parse_from(["kvc", "del"]).is_err());
    assert!(Cli::try_parse_from(["kvc", "set", "only-key"]).is_err());
    assert!(Cli::try_parse_from(["kvc"]).is_err());
}

#[tokio::test]
async fn test_string_commands() {
    let cache = MemoryCacheProvider::new();

    assert_eq!(run(&cache, &["get", "k"]).await, "(nil)\n");
    assert_eq!(run(&cache, &["set", "k", "v", "--ttl", "60"]).await, "OK\n");
    assert_eq!(run(&cache, &["get", "k"]).await, "v\n");
    assert_eq!(run(&cache, &["exists", "k"]).await, "true\n");
    assert_eq!(run(&cache, &["del", "k", "other"]).await, "1\n");
    assert_eq!(run(&cache, &["exists", "k"]).await, "false\n");
}

#[tokio::test]
async fn test_incr_command() {
    let cache = MemoryCacheProvider::new();

    assert_eq!(run(&cache, &["incr", "c"]).await, "1\n");
    assert_eq!(run(&cache, &["incr", "c", "--by", "10", "--ttl", "30"]).await, "11\n");
    assert_eq!(run(&cache, &["incr", "c", "--by", "-12"]).await, "-1\n");
}

#[tokio::test]
async fn test_hash_commands() {
    let cache = MemoryCacheProvider::new();

    assert_eq!(run(&cache, &["hset", "h", "b", "2"]).await, "OK\n");
    assert_eq!(run(&cache, &["hset", "h", "a", "1"]).await, "OK\n");
    assert_eq!(run(&cache, &["hget", "h", "a"]).await, "1\n");
    assert_eq!(run(&cache, &["hgetall", "h"]).await, "a=1\nb=2\n");
    assert_eq!(run(&cache, &["hdel", "h", "a", "zzz"]).await, "1\n");
    assert_eq!(run(&cache, &["hget", "h", "a"]).await, "(nil)\n");
}

#[tokio::test]
async fn test_providers_and_ping() {
    let cache = MemoryCacheProvider::new();

    let listing = run(&cache, &["providers"]).await;
    assert!(listing.lines().any(|line| line.starts_with("redis")));
    assert!(listing.lines().any(|line| line.starts_with("memory")));
    assert_eq!(run(&cache, &["ping"]).await, "PONG\n");
}

#[tokio::test]
async fn test_failed_command_is_an_error() {
    let cache = MemoryCacheProvider::new();
    run(&cache, &["set", "k", "text"]).await;

    let cli = Cli::try_parse_from(["kvc", "incr", "k"]).unwrap();
    let mut out = Vec::new();
    let result = execute(&cache, &OpContext::background(), &cli.command, &mut out).await;
    assert!(result.is_err());
    assert!(out.is_empty());
}
