//! Commands for the profile/stats screen

use crate::services::ChecklistStats;
use crate::AppState;

/// Fresh completion figures for every category
pub async fn get_stats(state: &AppState) -> Result<ChecklistStats, String> {
    let stats = state.stats.compute_stats().await;
    for failed in stats.categories.iter().filter(|s| s.error.is_some()) {
        log::warn!("Stats for {} unavailable", failed.category);
    }
    Ok(stats)
}
