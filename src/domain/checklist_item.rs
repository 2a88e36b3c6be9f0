//! Checklist Entities
//!
//! A checklist is an ordered list of items; insertion order is display order.
//! The persisted form is the bare JSON array of items, e.g.
//! `[{"id":"fire-1","label":"Fire Extinguisher","checked":false}]`, with
//! `isCustom` present only on user-added items.

use serde::{Deserialize, Serialize};

use super::entity::{first_duplicate_id, DomainError, DomainResult, Entity};

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChecklistItem {
    /// Unique within its checklist
    pub id: String,
    /// User-visible text
    pub label: String,
    /// Completion status
    pub checked: bool,
    /// True only for user-added items
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

impl ChecklistItem {
    /// Create an unchecked catalog item
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked: false,
            is_custom: false,
        }
    }

    /// Create an unchecked user-added item
    pub fn custom(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            is_custom: true,
            ..Self::new(id, label)
        }
    }
}

impl Entity for ChecklistItem {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Ordered, id-unique sequence of checklist items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChecklistCollection {
    items: Vec<ChecklistItem>,
}

impl ChecklistCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from items, rejecting duplicate ids and blank labels
    pub fn from_items(items: Vec<ChecklistItem>) -> DomainResult<Self> {
        if let Some(id) = first_duplicate_id(&items) {
            return Err(DomainError::InvalidInput(format!("duplicate item id '{}'", id)));
        }
        if let Some(item) = items.iter().find(|item| item.label.trim().is_empty()) {
            return Err(DomainError::InvalidInput(format!("item '{}' has an empty label", item.id)));
        }
        Ok(Self { items })
    }

    /// Decode a persisted value. Any shape mismatch or broken invariant is a
    /// `Parse` error attributed to `key`.
    pub fn decode(key: &str, raw: &str) -> DomainResult<Self> {
        let items: Vec<ChecklistItem> =
            serde_json::from_str(raw).map_err(|e| DomainError::parse(key, e))?;
        Self::from_items(items).map_err(|e| match e {
            DomainError::InvalidInput(msg) => DomainError::parse(key, msg),
            other => other,
        })
    }

    pub fn encode(&self) -> DomainResult<String> {
        serde_json::to_string(&self.items).map_err(|e| DomainError::Internal(e.to_string()))
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ChecklistItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of checked items
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    pub fn custom_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(|item| item.is_custom)
    }

    /// Flip `checked` on the matching item; returns whether one matched
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.checked = !item.checked;
                true
            }
            None => false,
        }
    }

    /// Append an item whose id is not yet present
    pub fn push(&mut self, item: ChecklistItem) -> DomainResult<()> {
        if self.contains(&item.id) {
            return Err(DomainError::InvalidInput(format!("duplicate item id '{}'", item.id)));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the matching item, returning it
    pub fn remove(&mut self, id: &str) -> Option<ChecklistItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn rename(&mut self, id: &str, label: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.label = label.to_string();
                true
            }
            None => false,
        }
    }
}
