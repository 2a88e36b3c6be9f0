//! Checklist Service
//!
//! Couples every successful store mutation with a change notification, so
//! no caller can persist a change and forget to tell the other screens.

use std::sync::Arc;

use crate::domain::{Category, ChecklistCollection, ChecklistItem, DomainResult};
use crate::events::ChecklistEvents;
use crate::repository::ChecklistStore;

pub struct ChecklistService {
    store: Arc<ChecklistStore>,
    events: Arc<ChecklistEvents>,
}

impl ChecklistService {
    pub fn new(store: Arc<ChecklistStore>, events: Arc<ChecklistEvents>) -> Self {
        Self { store, events }
    }

    pub async fn load(&self, category: Category) -> DomainResult<ChecklistCollection> {
        self.store.load(category).await
    }

    pub async fn toggle(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let item = self.store.toggle(category, id).await?;
        self.notify_if(category, item.is_some());
        Ok(item)
    }

    pub async fn add_custom_item(&self, category: Category, label: &str) -> DomainResult<Option<ChecklistItem>> {
        let item = self.store.add_custom_item(category, label).await?;
        self.notify_if(category, item.is_some());
        Ok(item)
    }

    pub async fn delete_item(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let item = self.store.delete_item(category, id).await?;
        self.notify_if(category, item.is_some());
        Ok(item)
    }

    pub async fn delete_custom_item(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let item = self.store.delete_custom_item(category, id).await?;
        self.notify_if(category, item.is_some());
        Ok(item)
    }

    pub async fn rename_item(&self, category: Category, id: &str, label: &str) -> DomainResult<Option<ChecklistItem>> {
        let item = self.store.rename_item(category, id, label).await?;
        self.notify_if(category, item.is_some());
        Ok(item)
    }

    fn notify_if(&self, category: Category, changed: bool) {
        if changed {
            self.events.emit(category);
        }
    }
}
