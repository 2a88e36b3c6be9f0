//! Repository Layer
//!
//! Persistence abstractions and implementations.

mod checklist_repo;
mod memory_store;
mod sqlite_store;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use checklist_repo::ChecklistStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
pub use traits::KeyValueStore;
