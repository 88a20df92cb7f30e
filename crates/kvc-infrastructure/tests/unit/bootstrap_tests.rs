//! Unit tests for provider bootstrap

use kvc_application::CacheProviderConfig;
use kvc_domain::Error;
use kvc_domain::value_objects::OpContext;
use kvc_infrastructure::config::AppConfig;
use kvc_infrastructure::{builtin_registry, connect};

#[test]
fn test_builtin_registry_has_every_provider() {
    let registry = builtin_registry();
    for name in ["null", "memory", "redis"] {
        assert!(registry.contains(name), "{name} should be registered");
    }
}

#[tokio::test]
async fn test_connect_default_config() {
    let cache = connect(&AppConfig::default()).await.unwrap();
    let ctx = OpContext::background();

    assert_eq!(cache.provider_name(), "memory");
    assert!(cache.write(&ctx, "k", "v").await);
    assert_eq!(cache.read(&ctx, "k").await.as_deref(), Some("v"));
}

#[tokio::test]
async fn test_connect_fails_when_ping_fails() {
    let config = AppConfig {
        cache: CacheProviderConfig::new("redis")
            .with_option("host", "127.0.0.1")
            .with_option("port", "1")
            .with_option("ping", "true"),
        ..AppConfig::default()
    };
    assert!(connect(&config).await.is_err());
}

#[tokio::test]
async fn test_connect_unknown_provider() {
    let config = AppConfig {
        cache: CacheProviderConfig::new("memcached"),
        ..AppConfig::default()
    };
    assert!(matches!(connect(&config).await, Err(Error::NotFound { .. })));
}
