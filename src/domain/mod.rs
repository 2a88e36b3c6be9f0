//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde for the persisted shape only).

mod catalog;
mod category;
mod checklist_item;
mod entity;

pub use catalog::{default_items, default_items_for, is_default_id};
pub use category::Category;
pub use checklist_item::{ChecklistCollection, ChecklistItem};
pub use entity::{first_duplicate_id, DomainError, DomainResult, Entity};
