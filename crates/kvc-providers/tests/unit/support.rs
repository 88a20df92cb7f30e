//! Test doubles shared by the provider suites

#![allow(dead_code)]

use async_trait::async_trait;
use kvc_domain::value_objects::{Expiry, OpContext, RawCommand, Reply};
use kvc_providers::{CacheProvider, DataProvider, Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Data provider that returns a fixed value and counts calls
#[derive(Debug)]
pub struct CountingSource {
    value: String,
    expiry: Expiry,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(value: &str, expiry: Expiry) -> Self {
        Self {
            value: value.to_string(),
            expiry,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for CountingSource {
    async fn produce(&self, _key: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }

    fn preferred_expiry(&self) -> Expiry {
        self.expiry
    }
}

/// Data provider whose origin is down
#[derive(Debug, Default)]
pub struct FailingSource;

#[async_trait]
impl DataProvider for FailingSource {
    async fn produce(&self, key: &str) -> Result<String> {
        Err(Error::provider(format!("origin unavailable for {key}")))
    }

    fn preferred_expiry(&self) -> Expiry {
        Expiry::from_secs(60)
    }
}

/// Cache provider whose store is unreachable
#[derive(Debug, Default)]
pub struct UnreachableCache;

fn down<T>() -> Result<T> {
    Err(Error::transport("connection refused"))
}

#[async_trait]
impl CacheProvider for UnreachableCache {
    async fn try_exists(&self, _ctx: &OpContext, _key: &str) -> Result<bool> {
        down()
    }

    async fn try_read(&self, _ctx: &OpContext, _key: &str) -> Result<Option<String>> {
        down()
    }

    async fn try_write(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _value: &str,
        _expiry: Expiry,
    ) -> Result<()> {
        down()
    }

    async fn try_delete(&self, _ctx: &OpContext, _keys: &[&str]) -> Result<u64> {
        down()
    }

    async fn try_hash_set(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _field: &str,
        _value: &str,
    ) -> Result<()> {
        down()
    }

    async fn try_hash_get(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _field: &str,
    ) -> Result<Option<String>> {
        down()
    }

    async fn try_hash_get_all(
        &self,
        _ctx: &OpContext,
        _key: &str,
    ) -> Result<HashMap<String, String>> {
        down()
    }

    async fn try_hash_delete(&self, _ctx: &OpContext, _key: &str, _fields: &[&str]) -> Result<u64> {
        down()
    }

    async fn try_hash_exists(&self, _ctx: &OpContext, _key: &str, _field: &str) -> Result<bool> {
        down()
    }

    async fn try_increment_by_with_expiry(
        &self,
        _ctx: &OpContext,
        _key: &str,
        _delta: i64,
        _expiry: Expiry,
    ) -> Result<i64> {
        down()
    }

    async fn try_script_eval(
        &self,
        _ctx: &OpContext,
        _script: &str,
        _keys: &[&str],
        _args: &[&str],
    ) -> Result<Reply> {
        down()
    }

    async fn raw_operate(&self, _ctx: &OpContext, _command: RawCommand) -> Result<Reply> {
        down()
    }

    async fn ping(&self, _ctx: &OpContext) -> Result<()> {
        down()
    }

    fn close(&self) {}

    fn provider_name(&self) -> &str {
        "unreachable"
    }
}
