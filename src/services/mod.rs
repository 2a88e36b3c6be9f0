//! Services Layer
//!
//! Use cases built on the repository: mutations that notify, resets and
//! completion stats.

mod checklist_service;
mod reset;
mod stats;

pub use checklist_service::ChecklistService;
pub use reset::{ResetCoordinator, ResetSummary};
pub use stats::{
    completion_percentage, CategoryStats, ChecklistStats, Completion, StatsAggregator, StatsWatch,
};
