//! App state persistence — JSON save/load across restarts.
//!
//! Selections are only meaningful for the file they were made on, so they
//! are tagged with the dataset fingerprint and dropped when it changes.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use eventlab_core::{RankingOrder, Selection};

use crate::app::{AppState, FilterList, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub fingerprint: String,
    pub selection: Selection,
    pub active_panel: Panel,
    pub filter_focus: FilterList,
    pub ranking: RankingOrder,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            fingerprint: String::new(),
            selection: Selection::default(),
            active_panel: Panel::Summary,
            filter_focus: FilterList::Assets,
            ranking: RankingOrder::default(),
        }
    }
}

/// `<config_dir>/eventlab/state.json`.
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventlab")
        .join("state.json")
}

/// Load persisted state from disk. A missing file gives defaults; a corrupt
/// one is an error the caller reports and then ignores.
pub fn load(path: &Path) -> anyhow::Result<PersistedState> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("parse {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PersistedState::default()),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        fingerprint: app.dataset.fingerprint().to_string(),
        selection: app.selection.clone(),
        active_panel: app.active_panel,
        filter_focus: app.filters.focus,
        ranking: app.ranking,
    }
}

/// Apply persisted state to AppState. Returns whether the selection was restored.
///
/// Panel, focus and ranking carry over unconditionally.
pub fn apply(app: &mut AppState, state: PersistedState) -> bool {
    app.active_panel = state.active_panel;
    app.filters.focus = state.filter_focus;
    app.ranking = state.ranking;

    if state.fingerprint != app.dataset.fingerprint() {
        if !state.fingerprint.is_empty() {
            log::info!("results file changed since last session; selection reset");
        }
        return false;
    }

    let mut selection = state.selection;
    selection.retain_known(&app.dataset);
    app.selection = selection;
    app.recompute();
    app.set_status("Restored previous selection");
    true
}
