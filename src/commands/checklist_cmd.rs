//! Commands for Checklist CRUD + Reset
//!
//! Exposes checklist operations to the UI layer. Categories arrive as names;
//! an unknown name yields an empty result rather than an error. Errors are
//! flattened to strings for display in an alert.

use crate::domain::{Category, ChecklistItem};
use crate::services::ResetSummary;
use crate::AppState;

fn parse_category(name: &str) -> Option<Category> {
    let category = Category::parse(name);
    if category.is_none() {
        log::warn!("Unknown checklist category '{}'", name);
    }
    category
}

/// Items of a checklist, seeding defaults on first access
pub async fn load_checklist(state: &AppState, category: String) -> Result<Vec<ChecklistItem>, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(Vec::new());
    };
    state
        .checklists
        .load(category)
        .await
        .map(|c| c.into_items())
        .map_err(|e| e.to_string())
}

/// Toggle an item and return the updated checklist
pub async fn toggle_item(state: &AppState, category: String, id: String) -> Result<Vec<ChecklistItem>, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(Vec::new());
    };
    state
        .checklists
        .toggle(category, &id)
        .await
        .map_err(|e| e.to_string())?;
    load_checklist(state, category.as_str().to_string()).await
}

/// Add a user item; `None` when the label is blank
pub async fn add_custom_item(
    state: &AppState,
    category: String,
    label: String,
) -> Result<Option<ChecklistItem>, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(None);
    };
    state
        .checklists
        .add_custom_item(category, &label)
        .await
        .map_err(|e| e.to_string())
}

/// Delete a user item. Default items are kept; use a reset to clean up.
pub async fn delete_item(state: &AppState, category: String, id: String) -> Result<bool, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(false);
    };

    state
        .checklists
        .delete_custom_item(category, &id)
        .await
        .map(|removed| removed.is_some())
        .map_err(|e| e.to_string())
}

pub async fn rename_item(
    state: &AppState,
    category: String,
    id: String,
    label: String,
) -> Result<Option<ChecklistItem>, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(None);
    };
    state
        .checklists
        .rename_item(category, &id, &label)
        .await
        .map_err(|e| e.to_string())
}

/// Restore one checklist to its defaults
pub async fn reset_checklist(state: &AppState, category: String) -> Result<Vec<ChecklistItem>, String> {
    let Some(category) = parse_category(&category) else {
        return Ok(Vec::new());
    };
    state
        .resets
        .reset(category)
        .await
        .map(|c| c.into_items())
        .map_err(|e| format!("Failed to reset checklist: {}", e))
}

/// Restore every checklist; fails if any category could not be reset
pub async fn reset_all_checklists(state: &AppState) -> Result<ResetSummary, String> {
    let summary = state.resets.reset_all().await;
    if summary.is_complete() {
        return Ok(summary);
    }

    let failed: Vec<String> = summary
        .failed
        .iter()
        .map(|(category, e)| format!("{} ({})", category, e))
        .collect();
    Err(format!("Failed to reset checklists: {}", failed.join(", ")))
}
