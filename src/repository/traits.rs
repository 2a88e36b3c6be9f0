//! Repository Layer - Core Traits
//!
//! Defines the abstract persistence interface.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// String key-value persistence backend
///
/// Every call is individually atomic; there are no cross-key transactions.
/// All operations are async to support various backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Delete `key`; deleting an absent key succeeds
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
