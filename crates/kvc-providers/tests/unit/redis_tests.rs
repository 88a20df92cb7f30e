//! Tests against a live Redis server on 127.0.0.1:6379
//!
//! Every key is prefixed with the test name so suites can share a server.

use crate::support::CountingSource;
use kvc_domain::NO_DATA;
use kvc_domain::value_objects::{Expiry, OpContext, RawCommand, Reply};
use kvc_providers::cache::{RedisCacheProvider, RedisSettings};
use kvc_providers::{CacheProvider, Error};
use std::time::Duration;

async fn provider() -> RedisCacheProvider {
    RedisCacheProvider::connect(RedisSettings::new("127.0.0.1", 6379).with_ping(true))
        .await
        .expect("redis must be running on 127.0.0.1:6379")
}

fn ctx() -> OpContext {
    OpContext::with_timeout(Duration::from_secs(2))
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_end_to_end() {
    let cache = provider().await;
    let ctx = ctx();
    cache.batch_delete(&ctx, &["e2e:k", "e2e:h", "e2e:c"]).await;

    assert!(cache.write_with_expiry(&ctx, "e2e:k", "v", Expiry::from_secs(30)).await);
    assert_eq!(cache.read(&ctx, "e2e:k").await.as_deref(), Some("v"));
    assert!(cache.exists(&ctx, "e2e:k").await);

    assert!(cache.hash_set(&ctx, "e2e:h", "f", "1").await);
    assert_eq!(cache.hash_get(&ctx, "e2e:h", "f").await.as_deref(), Some("1"));
    assert_eq!(cache.hash_get_all(&ctx, "e2e:h").await.len(), 1);
    assert!(cache.hash_delete(&ctx, "e2e:h", &["f"]).await);
    assert!(!cache.hash_exists(&ctx, "e2e:h", "f").await);

    assert!(cache.increment_with_expiry(&ctx, "e2e:c", Expiry::from_secs(30)).await);
    assert!(cache.increment(&ctx, "e2e:c").await);
    assert_eq!(cache.read(&ctx, "e2e:c").await.as_deref(), Some("2"));

    let ttl = cache
        .raw_operate(&ctx, RawCommand::new("PTTL").arg("e2e:c"))
        .await
        .unwrap();
    assert!(ttl.as_int().is_some_and(|ms| ms > 0 && ms <= 30_000));

    assert!(cache.batch_delete(&ctx, &["e2e:k", "e2e:c"]).await);
    assert!(!cache.exists(&ctx, "e2e:k").await);
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_failed_increment_is_atomic() {
    let cache = provider().await;
    let ctx = ctx();

    cache.write(&ctx, "atomic:k", "abc").await;
    let result = cache
        .try_increment_by_with_expiry(&ctx, "atomic:k", 1, Expiry::from_secs(60))
        .await;
    assert!(matches!(result, Err(Error::Provider { .. })));

    assert_eq!(cache.read(&ctx, "atomic:k").await.as_deref(), Some("abc"));
    let ttl = cache
        .raw_operate(&ctx, RawCommand::new("PTTL").arg("atomic:k"))
        .await
        .unwrap();
    assert_eq!(ttl, Reply::Int(-1));
    cache.delete(&ctx, "atomic:k").await;
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_script_eval() {
    let cache = provider().await;
    let ctx = ctx();

    let reply = cache
        .script_eval(&ctx, "return {KEYS[1], ARGV[1]}", &["script:k"], &["x"])
        .await;
    assert_eq!(reply, Reply::Array(vec![Reply::from("script:k"), Reply::from("x")]));

    let result = cache
        .try_script_eval(&ctx, "return redis.call('NOPE')", &[], &[])
        .await;
    assert!(matches!(result, Err(Error::Script { .. })));
    assert!(
        cache
            .script_eval(&ctx, "this is not lua", &[], &[])
            .await
            .is_nil()
    );
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_read_through() {
    let cache = provider().await;
    let ctx = ctx();
    cache.delete(&ctx, "rt:k").await;

    let source = CountingSource::new("loaded", Expiry::from_secs(30));
    assert_eq!(cache.read_through(&ctx, "rt:k", &source).await.as_deref(), Some("loaded"));
    assert_eq!(cache.read_through(&ctx, "rt:k", &source).await.as_deref(), Some("loaded"));
    assert_eq!(source.calls(), 1);
    cache.delete(&ctx, "rt:k").await;
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_write_read_and_real_expiry() {
    let cache = provider().await;
    let ctx = ctx();
    cache.batch_delete(&ctx, &["greeting", "temp"]).await;

    assert!(cache.write(&ctx, "greeting", "hello").await);
    assert_eq!(cache.read(&ctx, "greeting").await.as_deref(), Some("hello"));

    assert!(
        cache
            .write_with_expiry(&ctx, "temp", "x", Expiry::from_secs(1))
            .await
    );
    assert!(cache.exists(&ctx, "temp").await);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let ctx = OpContext::with_timeout(Duration::from_secs(2));
    assert!(!cache.exists(&ctx, "temp").await);
    assert_eq!(cache.read(&ctx, "temp").await, None);

    cache.delete(&ctx, "greeting").await;
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_read_through_no_data_is_not_cached() {
    let cache = provider().await;
    let ctx = ctx();
    cache.delete(&ctx, "rt:none").await;

    let source = CountingSource::new(NO_DATA, Expiry::from_secs(30));
    assert_eq!(
        cache.read_through(&ctx, "rt:none", &source).await.as_deref(),
        Some(NO_DATA)
    );
    assert!(!cache.exists(&ctx, "rt:none").await);

    cache.read_through(&ctx, "rt:none", &source).await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_read_through_keeps_hash() {
    let cache = provider().await;
    let ctx = ctx();
    cache.delete(&ctx, "rt:hash").await;
    assert!(cache.hash_set(&ctx, "rt:hash", "name", "ada").await);

    let read = cache.try_read(&ctx, "rt:hash").await;
    assert!(matches!(read, Err(Error::Provider { .. })));

    let source = CountingSource::new("fresh", Expiry::from_secs(30));
    assert_eq!(
        cache.read_through(&ctx, "rt:hash", &source).await.as_deref(),
        Some("fresh")
    );
    assert_eq!(
        cache.hash_get(&ctx, "rt:hash", "name").await.as_deref(),
        Some("ada")
    );
    cache.delete(&ctx, "rt:hash").await;
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_oversized_expiry_increments_with_ttl() {
    let cache = provider().await;
    let ctx = ctx();
    cache.delete(&ctx, "incr:forever").await;

    let value = cache
        .try_increment_by_with_expiry(
            &ctx,
            "incr:forever",
            1,
            Expiry::after(Duration::from_secs(u64::MAX)),
        )
        .await
        .unwrap();
    assert_eq!(value, 1);

    let ttl = cache
        .raw_operate(&ctx, RawCommand::new("PTTL").arg("incr:forever"))
        .await
        .unwrap();
    assert!(ttl.as_int().is_some_and(|ms| ms > 0));
    cache.delete(&ctx, "incr:forever").await;
}

#[tokio::test]
#[ignore = "requires a Redis server on 127.0.0.1:6379"]
async fn test_redis_close_degrades() {
    let cache = provider().await;
    let ctx = ctx();

    cache.close();
    cache.close();
    assert!(!cache.write(&ctx, "closed:k", "v").await);
    assert!(matches!(cache.ping(&ctx).await, Err(Error::Closed)));
}
