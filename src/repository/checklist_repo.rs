//! Checklist Repository
//!
//! Loads, seeds, mutates and persists per-category checklists on top of any
//! `KeyValueStore`. Each category has its own async lock and every
//! read-modify-write runs entirely under it, so two mutations of the same
//! checklist can never both start from the same stale snapshot.
//!
//! A mutation works on a freshly loaded copy and only returns the changed
//! state after the backend acknowledged the write; a failed write therefore
//! leaves the previously persisted checklist as the last-known-good value.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::KeyValueStore;
use crate::domain::{
    default_items, is_default_id, Category, ChecklistCollection, ChecklistItem, DomainError,
    DomainResult,
};

/// Last timestamp handed out for a custom item id
static LAST_CUSTOM_STAMP: AtomicI64 = AtomicI64::new(0);

/// Strictly increasing millisecond stamp, even within the same millisecond
fn next_custom_stamp() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST_CUSTOM_STAMP.load(Ordering::SeqCst);
    loop {
        let next = now.max(prev + 1);
        match LAST_CUSTOM_STAMP.compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

pub struct ChecklistStore {
    backend: Arc<dyn KeyValueStore>,
    locks: [Mutex<()>; Category::ALL.len()],
}

impl ChecklistStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    fn lock_for(&self, category: Category) -> &Mutex<()> {
        &self.locks[category.index()]
    }

    /// Load the checklist, seeding and persisting the catalog defaults on
    /// first access. A corrupt stored value is reported, never replaced.
    pub async fn load(&self, category: Category) -> DomainResult<ChecklistCollection> {
        let _guard = self.lock_for(category).lock().await;
        self.load_locked(category).await
    }

    /// Read-only view: the persisted checklist, or the defaults it would be
    /// seeded with. Never writes.
    pub async fn snapshot(&self, category: Category) -> DomainResult<ChecklistCollection> {
        let key = category.storage_key();
        match self.backend.get(&key).await? {
            Some(raw) => ChecklistCollection::decode(&key, &raw),
            None => Ok(default_items(category)),
        }
    }

    /// Replace the whole persisted checklist with `checklist`
    pub async fn save(&self, category: Category, checklist: &ChecklistCollection) -> DomainResult<()> {
        let _guard = self.lock_for(category).lock().await;
        self.persist(category, checklist).await
    }

    /// Flip `checked` on the item; an unknown id is a no-op returning `None`
    pub async fn toggle(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let _guard = self.lock_for(category).lock().await;
        let mut checklist = self.load_locked(category).await?;

        if !checklist.toggle(id) {
            log::debug!("Toggle ignored, {} has no item '{}'", category, id);
            return Ok(None);
        }
        self.persist(category, &checklist).await?;

        let item = checklist.get(id).cloned();
        if let Some(item) = &item {
            log::info!("Toggled {} item '{}' -> checked={}", category, id, item.checked);
        }
        Ok(item)
    }

    /// Append a user-added item. Blank labels are ignored (`None`).
    pub async fn add_custom_item(&self, category: Category, label: &str) -> DomainResult<Option<ChecklistItem>> {
        let label = label.trim();
        if label.is_empty() {
            log::debug!("Ignoring blank custom item for {}", category);
            return Ok(None);
        }

        let _guard = self.lock_for(category).lock().await;
        let mut checklist = self.load_locked(category).await?;

        let mut id = custom_id(category);
        while checklist.contains(&id) {
            id = custom_id(category);
        }
        let item = ChecklistItem::custom(id, label);
        checklist.push(item.clone())?;
        self.persist(category, &checklist).await?;

        log::info!("Added custom {} item '{}' ({})", category, item.label, item.id);
        Ok(Some(item))
    }

    /// Remove the item with `id`, returning it; unknown ids give `None`.
    ///
    /// Any item may be removed here. Restricting deletion to custom items is
    /// left to the caller.
    pub async fn delete_item(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let _guard = self.lock_for(category).lock().await;
        let mut checklist = self.load_locked(category).await?;

        let Some(removed) = checklist.remove(id) else {
            log::debug!("Delete ignored, {} has no item '{}'", category, id);
            return Ok(None);
        };
        self.persist(category, &checklist).await?;

        if is_default_id(category, id) {
            log::warn!("Deleted default {} item '{}'; a reset restores it", category, id);
        } else {
            log::info!("Deleted {} item '{}'", category, id);
        }
        Ok(Some(removed))
    }

    /// Remove a user-added item under the same lock as the check. Default
    /// items are refused with `InvalidInput`; unknown ids give `None`.
    pub async fn delete_custom_item(&self, category: Category, id: &str) -> DomainResult<Option<ChecklistItem>> {
        let _guard = self.lock_for(category).lock().await;
        let mut checklist = self.load_locked(category).await?;

        match checklist.get(id) {
            None => return Ok(None),
            Some(item) if !item.is_custom => {
                return Err(DomainError::InvalidInput(format!(
                    "Only custom items can be deleted ('{}' is a default item)",
                    id
                )));
            }
            Some(_) => {}
        }

        let removed = checklist.remove(id);
        self.persist(category, &checklist).await?;
        log::info!("Deleted custom {} item '{}'", category, id);
        Ok(removed)
    }

    /// Change the label of a custom item
    pub async fn rename_item(&self, category: Category, id: &str, label: &str) -> DomainResult<Option<ChecklistItem>> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DomainError::InvalidInput("label must not be empty".to_string()));
        }

        let _guard = self.lock_for(category).lock().await;
        let mut checklist = self.load_locked(category).await?;

        match checklist.get(id) {
            None => return Ok(None),
            Some(item) if !item.is_custom => {
                return Err(DomainError::InvalidInput(format!(
                    "'{}' is a default item and cannot be renamed",
                    id
                )));
            }
            Some(_) => {}
        }

        checklist.rename(id, label);
        self.persist(category, &checklist).await?;
        Ok(checklist.get(id).cloned())
    }

    /// `(checked, total)` for the checklist
    pub async fn progress(&self, category: Category) -> DomainResult<(usize, usize)> {
        let checklist = self.load(category).await?;
        Ok((checklist.completed(), checklist.len()))
    }

    async fn load_locked(&self, category: Category) -> DomainResult<ChecklistCollection> {
        let key = category.storage_key();
        match self.backend.get(&key).await? {
            Some(raw) => {
                let checklist = ChecklistCollection::decode(&key, &raw).inspect_err(|e| {
                    log::error!("Failed to read {}: {}", key, e);
                })?;
                log::debug!(
                    "Loaded {} items from {} ({} checked)",
                    checklist.len(),
                    key,
                    checklist.completed()
                );
                Ok(checklist)
            }
            None => {
                let defaults = default_items(category);
                self.persist(category, &defaults).await?;
                log::info!("Seeded {} with {} default items", key, defaults.len());
                Ok(defaults)
            }
        }
    }

    async fn persist(&self, category: Category, checklist: &ChecklistCollection) -> DomainResult<()> {
        let key = category.storage_key();
        let raw = checklist.encode()?;
        self.backend.set(&key, &raw).await.inspect_err(|e| {
            log::error!("Failed to save {}: {}", key, e);
        })
    }
}

fn custom_id(category: Category) -> String {
    format!("{}-custom-{}", category.id_prefix(), next_custom_stamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_stamps_strictly_increase() {
        let mut prev = next_custom_stamp();
        for _ in 0..1000 {
            let next = next_custom_stamp();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_custom_id_format() {
        let id = custom_id(Category::PowerOutage);
        assert!(id.starts_with("power-custom-"));
        assert!(!is_default_id(Category::PowerOutage, &id));
    }
}
