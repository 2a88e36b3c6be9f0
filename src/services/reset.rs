//! Reset Coordinator
//!
//! A reset rewrites a checklist to its catalog defaults, all unchecked, with
//! every custom item dropped. The new value is computed first and written
//! with a single `set`; the key is never cleared beforehand, so a failed
//! write leaves the previous checklist in place.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::{default_items, Category, ChecklistCollection, DomainError, DomainResult};
use crate::events::ChecklistEvents;
use crate::repository::ChecklistStore;

/// Outcome of [`ResetCoordinator::reset_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub reset: Vec<Category>,
    pub failed: Vec<(Category, DomainError)>,
}

impl ResetSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ResetCoordinator {
    store: Arc<ChecklistStore>,
    events: Arc<ChecklistEvents>,
}

impl ResetCoordinator {
    pub fn new(store: Arc<ChecklistStore>, events: Arc<ChecklistEvents>) -> Self {
        Self { store, events }
    }

    pub async fn reset(&self, category: Category) -> DomainResult<ChecklistCollection> {
        log::info!("=== Resetting {} checklist ===", category);
        let defaults = default_items(category);
        self.store.save(category, &defaults).await?;
        log::info!(
            "Reset {} to {} default items, all unchecked",
            category,
            defaults.len()
        );

        self.events.emit(category);
        Ok(defaults)
    }

    /// Reset every category, continuing past individual failures
    pub async fn reset_all(&self) -> ResetSummary {
        let mut summary = ResetSummary::default();
        for category in Category::ALL {
            match self.reset(category).await {
                Ok(_) => summary.reset.push(category),
                Err(e) => {
                    log::error!("Error resetting {} checklist: {}", category, e);
                    summary.failed.push((category, e));
                }
            }
        }
        summary
    }
}
