//! Application state — single-owner, main-thread only.
//!
//! The dataset is loaded before the terminal starts and never changes; every
//! filter interaction recomputes the whole view synchronously.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use eventlab_core::{DashboardView, Dataset, LoadReport, LoadedResults, RankingOrder, Selection};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Filters,
    Summary,
    Speed,
    Paths,
    Detail,
    Help,
}

impl Panel {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        match self {
            Panel::Filters => 0,
            Panel::Summary => 1,
            Panel::Speed => 2,
            Panel::Paths => 3,
            Panel::Detail => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Filters),
            1 => Some(Panel::Summary),
            2 => Some(Panel::Speed),
            3 => Some(Panel::Paths),
            4 => Some(Panel::Detail),
            5 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Filters => "Filters",
            Panel::Summary => "Summary",
            Panel::Speed => "Speed",
            Panel::Paths => "Paths",
            Panel::Detail => "Detail",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Filters)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Filters)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    LoadReport,
}

/// Which list the Filters panel cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterList {
    Assets,
    Events,
}

/// Filters panel state: two checkbox lists.
#[derive(Debug, Clone)]
pub struct FiltersState {
    pub assets: Vec<String>,
    pub events: Vec<String>,
    pub focus: FilterList,
    pub asset_cursor: usize,
    pub event_cursor: usize,
}

impl FiltersState {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            assets: dataset.assets(),
            events: dataset.events(),
            focus: FilterList::Assets,
            asset_cursor: 0,
            event_cursor: 0,
        }
    }

    fn focused(&self) -> (&[String], usize) {
        match self.focus {
            FilterList::Assets => (&self.assets, self.asset_cursor),
            FilterList::Events => (&self.events, self.event_cursor),
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            FilterList::Assets => &mut self.asset_cursor,
            FilterList::Events => &mut self.event_cursor,
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.focused().0.len();
        let cursor = self.cursor_mut();
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn switch_list(&mut self) {
        self.focus = match self.focus {
            FilterList::Assets => FilterList::Events,
            FilterList::Events => FilterList::Assets,
        };
    }

    /// Name under the cursor in the focused list.
    pub fn cursor_item(&self) -> Option<&str> {
        let (items, cursor) = self.focused();
        items.get(cursor).map(String::as_str)
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data (immutable for the session)
    pub dataset: Dataset,
    pub report: LoadReport,

    // Selection and derived view
    pub selection: Selection,
    pub view: DashboardView,
    pub ranking: RankingOrder,

    // Panel states
    pub filters: FiltersState,
    pub summary_scroll: usize,
    pub speed_scroll: usize,
    pub detail_scroll: usize,
    pub report_scroll: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,

    pub state_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(loaded: LoadedResults, ranking: RankingOrder, state_path: Option<PathBuf>) -> Self {
        let LoadedResults { dataset, report } = loaded;
        let selection = Selection::all(&dataset);
        let view = DashboardView::compute(&dataset, &selection);
        let filters = FiltersState::new(&dataset);
        let mut app = Self {
            active_panel: Panel::Summary,
            running: true,
            dataset,
            report,
            selection,
            view,
            ranking,
            filters,
            summary_scroll: 0,
            speed_scroll: 0,
            detail_scroll: 0,
            report_scroll: 0,
            status_message: None,
            overlay: Overlay::None,
            state_path,
        };
        if app.report.is_clean() {
            app.set_status(format!(
                "Loaded {} rows from {}",
                app.dataset.len(),
                app.dataset.source().display()
            ));
        } else {
            app.set_warning(format!(
                "Loaded {} rows, {} rejected (press r for details)",
                app.dataset.len(),
                app.report.rejected.len()
            ));
        }
        app
    }

    /// Filter → aggregate → paths for the current selection.
    pub fn recompute(&mut self) {
        self.view = DashboardView::compute(&self.dataset, &self.selection);
        self.summary_scroll = self.summary_scroll.min(self.view.summary.len().saturating_sub(1));
        self.speed_scroll = self.speed_scroll.min(self.view.summary.len().saturating_sub(1));
        self.detail_scroll = self.detail_scroll.min(self.view.detail.len().saturating_sub(1));
        if self.selection.is_empty() {
            self.set_warning("Nothing selected: pick at least one asset and one event");
        } else {
            self.set_status(format!(
                "{} rows, {} assets selected",
                self.view.detail.len(),
                self.view.summary.len()
            ));
        }
    }

    /// Toggle the name under the Filters cursor.
    pub fn toggle_cursor(&mut self) {
        let Some(name) = self.filters.cursor_item().map(str::to_string) else {
            return;
        };
        match self.filters.focus {
            FilterList::Assets => self.selection.toggle_asset(&name),
            FilterList::Events => self.selection.toggle_event(&name),
        }
        self.recompute();
    }

    /// Select every name in the focused list.
    pub fn select_all(&mut self) {
        match self.filters.focus {
            FilterList::Assets => self.selection.assets = self.filters.assets.iter().cloned().collect(),
            FilterList::Events => self.selection.events = self.filters.events.iter().cloned().collect(),
        }
        self.recompute();
    }

    /// Clear the focused list.
    pub fn select_none(&mut self) {
        match self.filters.focus {
            FilterList::Assets => self.selection.assets.clear(),
            FilterList::Events => self.selection.events.clear(),
        }
        self.recompute();
    }

    pub fn toggle_ranking(&mut self) {
        self.ranking = self.ranking.toggle();
        self.set_status(format!("Speed chart order: {}", self.ranking.label()));
    }

    /// Show an error in the status bar and log it.
    pub fn push_error(&mut self, message: String) {
        log::error!("{message}");
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
