//! Domain Layer - Core Entity Trait and Errors
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Returns the first identifier that occurs more than once, if any
pub fn first_duplicate_id<T: Entity>(entities: &[T]) -> Option<&T::Id> {
    let mut seen = HashSet::with_capacity(entities.len());
    entities.iter().map(|e| e.id()).find(|id| !seen.insert(*id))
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Persisted value exists but cannot be read back as a checklist
    #[error("Corrupt data under '{key}': {message}")]
    Parse { key: String, message: String },
    /// Backend rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn parse(key: impl Into<String>, message: impl ToString) -> Self {
        DomainError::Parse {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, DomainError::Parse { .. })
    }
}
