//! RescueReady Core
//!
//! Layered architecture:
//! - domain: categories, checklist entities, default catalog, errors
//! - repository: key-value persistence and the checklist store
//! - events: in-process change notifications
//! - services: notifying mutations, resets, completion stats
//! - commands: UI-facing handlers

pub mod commands;
pub mod config;
pub mod domain;
pub mod events;
pub mod repository;
pub mod services;

use std::sync::Arc;

use config::{AppConfig, StorageBackend};
use domain::DomainResult;
use events::ChecklistEvents;
use repository::{ChecklistStore, KeyValueStore, MemoryStore, SqliteStore};
use services::{ChecklistService, ResetCoordinator, StatsAggregator};

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<ChecklistStore>,
    pub events: Arc<ChecklistEvents>,
    pub checklists: ChecklistService,
    pub resets: ResetCoordinator,
    pub stats: Arc<StatsAggregator>,
}

impl AppState {
    /// Start logging, open the configured backend and wire the services
    pub async fn initialize(config: AppConfig) -> DomainResult<Self> {
        if config.logging_enabled && !rolling_logger::is_initialized() {
            if let Err(e) = rolling_logger::init_logger(config.log_dir(), &config.app_name) {
                eprintln!(
                    "[{}] Failed to init rolling logger: {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    e
                );
            }
        }

        let backend: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.db_path()).await?),
            StorageBackend::Memory => {
                log::warn!("Using in-memory storage; checklists will not be kept");
                Arc::new(MemoryStore::new())
            }
        };

        log::info!("{} state ready ({:?} backend)", config.app_name, config.backend);
        Ok(Self::with_backend(config, backend))
    }

    /// Wire the services over an existing backend
    pub fn with_backend(config: AppConfig, backend: Arc<dyn KeyValueStore>) -> Self {
        let store = Arc::new(ChecklistStore::new(backend));
        let events = Arc::new(ChecklistEvents::new());

        Self {
            checklists: ChecklistService::new(store.clone(), events.clone()),
            resets: ResetCoordinator::new(store.clone(), events.clone()),
            stats: Arc::new(StatsAggregator::new(store.clone())),
            config,
            store,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[tokio::test]
    async fn test_initialize_sqlite_state_persists_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            logging_enabled: false,
            ..AppConfig::default()
        };

        {
            let state = AppState::initialize(config.clone()).await.unwrap();
            state.checklists.toggle(Category::Fire, "fire-1").await.unwrap();
        }
        assert!(config.db_path().exists());

        let state = AppState::initialize(config).await.unwrap();
        let fire = state.checklists.load(Category::Fire).await.unwrap();
        assert!(fire.get("fire-1").unwrap().checked);
    }

    #[tokio::test]
    async fn test_initialize_memory_state() {
        let state = AppState::initialize(AppConfig::ephemeral()).await.unwrap();
        let stats = state.stats.compute_stats().await;
        assert_eq!(stats.overall.percentage, 0);
    }
}
