//! The loaded results table, held read-only for the whole session.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::load::InputFormat;
use crate::schema::{MetricField, ResultRow};

/// Immutable handle to the loaded rows.
///
/// Cloning is cheap (the rows sit behind an `Arc`); every view is derived
/// from it by filtering and aggregation, never by mutation.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[ResultRow]>,
    source: PathBuf,
    fingerprint: String,
}

impl Dataset {
    pub fn new(rows: Vec<ResultRow>, source: impl Into<PathBuf>) -> Self {
        let fingerprint = compute_fingerprint(&rows);
        Self {
            rows: rows.into(),
            source: source.into(),
            fingerprint,
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path the rows were loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// BLAKE3 hex digest over every row, in file order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// First 12 hex chars of the fingerprint, for status lines.
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..12.min(self.fingerprint.len())]
    }

    /// Distinct assets, sorted.
    pub fn assets(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.asset.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct events, sorted.
    pub fn events(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.event.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }
}

/// Deterministic hash over asset, event and all metric bit patterns.
fn compute_fingerprint(rows: &[ResultRow]) -> String {
    let mut hasher = blake3::Hasher::new();
    for row in rows {
        hasher.update(row.asset.as_bytes());
        hasher.update(&[0]);
        hasher.update(row.event.as_bytes());
        hasher.update(&[0]);
        for field in MetricField::ALL {
            hasher.update(&row.metric(field).to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// A source row that failed validation and was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// 1-based row number in the source, header included.
    pub line: usize,
    /// Asset cell, when it was readable.
    pub asset: Option<String>,
    pub reason: String,
}

/// What happened while decoding and validating the results file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub source: PathBuf,
    pub format: InputFormat,
    /// Data rows seen (header excluded, fully blank rows excluded).
    pub rows_read: usize,
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    pub fn rows_used(&self) -> usize {
        self.rows_read - self.rejected.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Output of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedResults {
    pub dataset: Dataset,
    pub report: LoadReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(asset: &str, event: &str, imm: f64) -> ResultRow {
        ResultRow {
            asset: asset.into(),
            event: event.into(),
            immediate_return: imm,
            post_return: 0.001,
            vol_change: 2.5,
            max_drawdown: -0.8,
            time_to_peak: 15.0,
        }
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let ds = Dataset::new(
            vec![
                row("ZN", "FOMC 2024-12-18", 0.001),
                row("EURUSD", "CPI 2024-11-13", 0.002),
                row("ZN", "CPI 2024-11-13", 0.003),
            ],
            "mem",
        );
        assert_eq!(ds.assets(), vec!["EURUSD", "ZN"]);
        assert_eq!(ds.events(), vec!["CPI 2024-11-13", "FOMC 2024-12-18"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Dataset::new(vec![row("ZN", "FOMC", 0.001)], "a.csv");
        let b = Dataset::new(vec![row("ZN", "FOMC", 0.001)], "b.csv");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_eq!(a.short_fingerprint().len(), 12);
    }

    #[test]
    fn fingerprint_tracks_values_and_order() {
        let base = Dataset::new(vec![row("ZN", "FOMC", 0.001), row("ES", "CPI", 0.002)], "x");
        let changed = Dataset::new(vec![row("ZN", "FOMC", 0.0011), row("ES", "CPI", 0.002)], "x");
        let reordered = Dataset::new(vec![row("ES", "CPI", 0.002), row("ZN", "FOMC", 0.001)], "x");
        assert_ne!(base.fingerprint(), changed.fingerprint());
        assert_ne!(base.fingerprint(), reordered.fingerprint());
    }

    #[test]
    fn field_boundaries_are_hashed() {
        let a = Dataset::new(vec![row("ZNF", "OMC", 0.001)], "x");
        let b = Dataset::new(vec![row("ZN", "FOMC", 0.001)], "x");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn clones_share_rows() {
        let a = Dataset::new(vec![row("ZN", "FOMC", 0.001)], "x");
        let b = a.clone();
        assert!(std::ptr::eq(a.rows().as_ptr(), b.rows().as_ptr()));
    }

    #[test]
    fn report_counts_used_rows() {
        let report = LoadReport {
            source: "x.csv".into(),
            format: InputFormat::Csv,
            rows_read: 5,
            rejected: vec![RejectedRow {
                line: 3,
                asset: Some("ZN".into()),
                reason: "missing value for 'Vol Change (%)'".into(),
            }],
        };
        assert_eq!(report.rows_used(), 4);
        assert!(!report.is_clean());
    }
}
