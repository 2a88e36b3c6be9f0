//! Test backends

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use super::{KeyValueStore, MemoryStore};
use crate::domain::{DomainError, DomainResult};

/// Memory store that can be told to reject reads or writes per key
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, key: &str) {
        self.failing_reads.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_writes(&self, key: &str) {
        self.failing_writes.lock().unwrap().insert(key.to_string());
    }

    pub fn heal(&self) {
        self.failing_reads.lock().unwrap().clear();
        self.failing_writes.lock().unwrap().clear();
    }

    /// Bypass failure injection, e.g. to plant a corrupt value
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.inner.set(key, value).await.unwrap();
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        if self.failing_reads.lock().unwrap().contains(key) {
            return Err(DomainError::Storage(format!("read of {} rejected", key)));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        if self.failing_writes.lock().unwrap().contains(key) {
            return Err(DomainError::Storage(format!("write of {} rejected", key)));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        if self.failing_writes.lock().unwrap().contains(key) {
            return Err(DomainError::Storage(format!("remove of {} rejected", key)));
        }
        self.inner.remove(key).await
    }
}
