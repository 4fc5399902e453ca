//! Test helpers for building app state from demo rows.

use eventlab_core::load::InputFormat;
use eventlab_core::sample::{sample_rows, DEFAULT_SEED};
use eventlab_core::{Dataset, LoadReport, LoadedResults, RankingOrder};

use crate::app::AppState;

pub fn loaded() -> LoadedResults {
    let rows = sample_rows(DEFAULT_SEED);
    let report = LoadReport {
        source: "sample.csv".into(),
        format: InputFormat::Csv,
        rows_read: rows.len(),
        rejected: Vec::new(),
    };
    LoadedResults {
        dataset: Dataset::new(rows, "sample.csv"),
        report,
    }
}

pub fn sample_app() -> AppState {
    AppState::new(loaded(), RankingOrder::default(), None)
}
