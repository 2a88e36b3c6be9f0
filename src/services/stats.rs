//! Stats Aggregator
//!
//! Completion figures across all checklists, recomputed from storage on
//! every request. A category whose read fails is reported with its error
//! and counts as 0 of 0 toward the overall figures.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::Category;
use crate::events::{ChecklistEvents, Subscription, Topic};
use crate::repository::ChecklistStore;

/// `round(100 * completed / total)`, half up; 0 for an empty checklist
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl Completion {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: completion_percentage(completed, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub display_name: String,
    #[serde(flatten)]
    pub completion: Completion,
    /// Set when the checklist could not be read
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistStats {
    pub categories: Vec<CategoryStats>,
    pub overall: Completion,
}

impl ChecklistStats {
    pub fn get(&self, category: Category) -> Option<&CategoryStats> {
        self.categories.iter().find(|s| s.category == category)
    }
}

pub struct StatsAggregator {
    store: Arc<ChecklistStore>,
}

impl StatsAggregator {
    pub fn new(store: Arc<ChecklistStore>) -> Self {
        Self { store }
    }

    pub async fn category_stats(&self, category: Category) -> CategoryStats {
        let (completion, error) = match self.store.snapshot(category).await {
            Ok(checklist) => (Completion::new(checklist.completed(), checklist.len()), None),
            Err(e) => {
                log::warn!("Stats skipped {}: {}", category, e);
                (Completion::default(), Some(e.to_string()))
            }
        };

        CategoryStats {
            category,
            display_name: category.display_name().to_string(),
            completion,
            error,
        }
    }

    pub async fn compute_stats(&self) -> ChecklistStats {
        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            categories.push(self.category_stats(category).await);
        }

        let completed = categories.iter().map(|s| s.completion.completed).sum();
        let total = categories.iter().map(|s| s.completion.total).sum();
        ChecklistStats {
            overall: Completion::new(completed, total),
            categories,
        }
    }

    /// Keep a stats value current: recomputed after every change emitted on
    /// `events`, published through a watch channel.
    pub async fn watch(self: Arc<Self>, events: &ChecklistEvents) -> StatsWatch {
        let (notify_tx, mut notify_rx) = mpsc::unbounded_channel::<Category>();
        let subscription = events.subscribe(Topic::All, move |event| {
            // Receiver gone means the refresh task ended; nothing to do.
            let _ = notify_tx.send(event.category);
        });

        let (stats_tx, stats_rx) = watch::channel(self.compute_stats().await);
        let aggregator = self;
        let task = tokio::spawn(async move {
            while let Some(category) = notify_rx.recv().await {
                // Collapse a burst (e.g. reset all) into one recompute
                while notify_rx.try_recv().is_ok() {}
                log::debug!("Refreshing stats after {} change", category);

                if stats_tx.send(aggregator.compute_stats().await).is_err() {
                    break;
                }
            }
        });

        StatsWatch {
            subscription,
            receiver: stats_rx,
            task: Some(task),
        }
    }
}

/// Live stats feed returned by [`StatsAggregator::watch`]. Dropping it
/// unsubscribes and aborts the refresh task.
pub struct StatsWatch {
    subscription: Subscription,
    receiver: watch::Receiver<ChecklistStats>,
    task: Option<JoinHandle<()>>,
}

impl StatsWatch {
    pub fn receiver(&self) -> watch::Receiver<ChecklistStats> {
        self.receiver.clone()
    }

    pub fn current(&self) -> ChecklistStats {
        self.receiver.borrow().clone()
    }

    /// Stop refreshing; waits for the refresh task to finish
    pub async fn stop(mut self) {
        self.subscription.unsubscribe();
        // The task ends once the listener (and its sender) is dropped.
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for StatsWatch {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
