//! EventLab Core — event impact results: schema, loading, filtering, aggregation.
//!
//! The event-impact metrics are computed upstream by the event study notebook
//! and exported as a seven-column table. This crate:
//! - Decodes that table (xlsx, csv, parquet) into validated `ResultRow`s
//! - Holds it as an immutable `Dataset` handle for the session
//! - Filters by selected assets/events and pivots into per-asset means
//! - Generates the illustrative synthetic price path per asset
//! - Owns the display rules shared by the TUI and the CLI

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod export;
pub mod filter;
pub mod format;
pub mod load;
pub mod path;
pub mod ranking;
pub mod sample;
pub mod schema;

pub use aggregate::{summarize, SummaryRow};
pub use config::{ConfigError, DashboardConfig, TuiConfig};
pub use dataset::{Dataset, LoadReport, LoadedResults, RejectedRow};
pub use export::{export_view, ExportError, ExportManifest};
pub use filter::{filter_rows, Selection};
pub use load::{load_results, InputFormat, LoadError, LoadOptions};
pub use path::{price_paths, synthetic_path, PathPoint, PricePath};
pub use ranking::{speed_ranking, RankingOrder, SpeedBar};
pub use schema::{MetricField, ResultRow, SchemaError};

/// Result of one recompute pass: everything the views render for a selection.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Filtered raw rows, in file order.
    pub detail: Vec<ResultRow>,
    /// Per-asset means, ordered by asset.
    pub summary: Vec<SummaryRow>,
    /// One synthetic path per summary row, same order.
    pub paths: Vec<PricePath>,
}

impl DashboardView {
    /// Run filter → aggregate → paths for a selection.
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let detail: Vec<ResultRow> = filter_rows(dataset.rows(), selection)
            .into_iter()
            .cloned()
            .collect();
        let summary = summarize(&detail);
        let paths = price_paths(&summary);
        log::debug!(
            "recompute: {} rows selected, {} assets summarized",
            detail.len(),
            summary.len()
        );
        Self {
            detail,
            summary,
            paths,
        }
    }

    /// Speed-of-pricing bars for the summary in the given order.
    pub fn ranking(&self, order: RankingOrder) -> Vec<SpeedBar> {
        speed_ranking(&self.summary, order)
    }
}
