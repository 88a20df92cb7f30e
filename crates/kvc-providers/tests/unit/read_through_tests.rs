//! Unit tests for cache-aside reads

use crate::support::{CountingSource, FailingSource, UnreachableCache};
use kvc_domain::NO_DATA;
use kvc_domain::value_objects::{Expiry, OpContext};
use kvc_providers::CacheProvider;
use kvc_providers::cache::MemoryCacheProvider;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_cold_key_is_produced_and_cached() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();
    let source = CountingSource::new("v1", Expiry::from_secs(10));

    let value = cache.read_through(&ctx, "k", &source).await;
    assert_eq!(value.as_deref(), Some("v1"));
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.time_to_live("k"), Some(Duration::from_secs(10)));

    // Warm key: a different source is never consulted
    let other = CountingSource::new("v2", Expiry::from_secs(10));
    let value = cache.read_through(&ctx, "k", &other).await;
    assert_eq!(value.as_deref(), Some("v1"));
    assert_eq!(other.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_expired_value_is_produced_again() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();
    let source = CountingSource::new("v", Expiry::from_secs(1));

    cache.read_through(&ctx, "k", &source).await;
    tokio::time::advance(Duration::from_secs(2)).await;
    cache.read_through(&ctx, "k", &source).await;

    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_no_data_is_returned_but_not_cached() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();
    let source = CountingSource::new(NO_DATA, Expiry::from_secs(60));

    assert_eq!(cache.read_through(&ctx, "k", &source).await.as_deref(), Some(NO_DATA));
    assert!(!cache.exists(&ctx, "k").await);

    cache.read_through(&ctx, "k", &source).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failing_source_yields_none() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();

    assert_eq!(cache.read_through(&ctx, "k", &FailingSource).await, None);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_unreachable_cache_falls_back_to_source() {
    let cache = UnreachableCache;
    let ctx = OpContext::background();
    let source = CountingSource::new("fresh", Expiry::from_secs(60));

    let value = cache.read_through(&ctx, "k", &source).await;
    assert_eq!(value.as_deref(), Some("fresh"));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_cancelled_context_skips_source() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();
    ctx.cancel();
    let source = CountingSource::new("v", Expiry::from_secs(60));

    assert_eq!(cache.read_through(&ctx, "k", &source).await, None);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_key_of_another_type_is_left_alone() {
    let cache = MemoryCacheProvider::new();
    let ctx = OpContext::background();
    assert!(cache.hash_set(&ctx, "user:1", "name", "ada").await);
    let source = CountingSource::new("fresh", Expiry::from_secs(60));

    let value = cache.read_through(&ctx, "user:1", &source).await;
    assert_eq!(value.as_deref(), Some("fresh"));
    assert_eq!(source.calls(), 1);

    assert_eq!(
        cache.hash_get(&ctx, "user:1", "name").await.as_deref(),
        Some("ada")
    );
    assert!(cache.try_read(&ctx, "user:1").await.is_err());
}
