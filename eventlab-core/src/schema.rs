//! The results-table contract shared with the upstream event study.
//!
//! Seven columns, matched by exact header text (surrounding whitespace is
//! ignored). Extra columns are tolerated and dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COL_ASSET: &str = "Asset";
pub const COL_EVENT: &str = "Event";
pub const COL_IMMEDIATE_RETURN: &str = "Immediate Return (30min)";
pub const COL_POST_RETURN: &str = "Post Return (24h)";
pub const COL_VOL_CHANGE: &str = "Vol Change (%)";
pub const COL_MAX_DRAWDOWN: &str = "Max Drawdown (%)";
pub const COL_TIME_TO_PEAK: &str = "Time to Peak (min)";

/// All required headers in canonical order.
pub const COLUMNS: [&str; 7] = [
    COL_ASSET,
    COL_EVENT,
    COL_IMMEDIATE_RETURN,
    COL_POST_RETURN,
    COL_VOL_CHANGE,
    COL_MAX_DRAWDOWN,
    COL_TIME_TO_PEAK,
];

/// One numeric column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricField {
    ImmediateReturn,
    PostReturn,
    VolChange,
    MaxDrawdown,
    TimeToPeak,
}

impl MetricField {
    /// Every metric, in column order.
    pub const ALL: [MetricField; 5] = [
        MetricField::ImmediateReturn,
        MetricField::PostReturn,
        MetricField::VolChange,
        MetricField::MaxDrawdown,
        MetricField::TimeToPeak,
    ];

    /// The metrics averaged into the per-asset summary.
    pub const SUMMARY: [MetricField; 4] = [
        MetricField::ImmediateReturn,
        MetricField::VolChange,
        MetricField::MaxDrawdown,
        MetricField::TimeToPeak,
    ];

    /// Header text in the results file.
    pub fn column(self) -> &'static str {
        match self {
            MetricField::ImmediateReturn => COL_IMMEDIATE_RETURN,
            MetricField::PostReturn => COL_POST_RETURN,
            MetricField::VolChange => COL_VOL_CHANGE,
            MetricField::MaxDrawdown => COL_MAX_DRAWDOWN,
            MetricField::TimeToPeak => COL_TIME_TO_PEAK,
        }
    }

    /// Narrow label for terminal tables.
    pub fn short_label(self) -> &'static str {
        match self {
            MetricField::ImmediateReturn => "Imm 30m",
            MetricField::PostReturn => "Post 24h",
            MetricField::VolChange => "Vol Chg",
            MetricField::MaxDrawdown => "Max DD",
            MetricField::TimeToPeak => "Peak min",
        }
    }

    /// Machine-friendly key for CSV/JSON export.
    pub fn key(self) -> &'static str {
        match self {
            MetricField::ImmediateReturn => "immediate_return",
            MetricField::PostReturn => "post_return",
            MetricField::VolChange => "vol_change",
            MetricField::MaxDrawdown => "max_drawdown",
            MetricField::TimeToPeak => "time_to_peak",
        }
    }
}

/// One (event, asset) observation from the upstream event study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Asset")]
    pub asset: String,
    #[serde(rename = "Event")]
    pub event: String,
    /// Fraction, e.g. 0.0123 = 1.23%.
    #[serde(rename = "Immediate Return (30min)")]
    pub immediate_return: f64,
    /// Fraction.
    #[serde(rename = "Post Return (24h)")]
    pub post_return: f64,
    /// Percentage points.
    #[serde(rename = "Vol Change (%)")]
    pub vol_change: f64,
    /// Percentage points.
    #[serde(rename = "Max Drawdown (%)")]
    pub max_drawdown: f64,
    /// Minutes after the announcement, non-negative.
    #[serde(rename = "Time to Peak (min)")]
    pub time_to_peak: f64,
}

impl ResultRow {
    pub fn metric(&self, field: MetricField) -> f64 {
        match field {
            MetricField::ImmediateReturn => self.immediate_return,
            MetricField::PostReturn => self.post_return,
            MetricField::VolChange => self.vol_change,
            MetricField::MaxDrawdown => self.max_drawdown,
            MetricField::TimeToPeak => self.time_to_peak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("no header row")]
    NoHeader,
}

/// Position of each required column within a decoded header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Indexed like `COLUMNS`.
    positions: [usize; 7],
}

impl ColumnMap {
    /// Locate every required column, rejecting absent or repeated headers.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, SchemaError> {
        if headers.is_empty() {
            return Err(SchemaError::NoHeader);
        }
        let mut positions = [usize::MAX; 7];
        for (idx, header) in headers.iter().enumerate() {
            let name = header.as_ref().trim();
            if let Some(slot) = COLUMNS.iter().position(|c| *c == name) {
                if positions[slot] != usize::MAX {
                    return Err(SchemaError::DuplicateColumn(name.to_string()));
                }
                positions[slot] = idx;
            }
        }
        for (slot, pos) in positions.iter().enumerate() {
            if *pos == usize::MAX {
                return Err(SchemaError::MissingColumn(COLUMNS[slot].to_string()));
            }
        }
        Ok(Self { positions })
    }

    /// Source index of the column with the given canonical name.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|slot| self.positions[slot])
    }

    /// Source indices in canonical order.
    pub fn positions(&self) -> [usize; 7] {
        self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_any_order_and_ignores_extras() {
        let headers = vec![
            "Time to Peak (min)",
            "Notes",
            " Asset ",
            "Event",
            "Max Drawdown (%)",
            "Vol Change (%)",
            "Post Return (24h)",
            "Immediate Return (30min)",
        ];
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.index_of(COL_ASSET), Some(2));
        assert_eq!(map.index_of(COL_TIME_TO_PEAK), Some(0));
        assert_eq!(map.positions(), [2, 3, 7, 6, 5, 4, 0]);
    }

    #[test]
    fn missing_column_is_named() {
        let headers = vec!["Asset", "Event", "Immediate Return (30min)"];
        let err = ColumnMap::resolve(&headers).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn(COL_POST_RETURN.into()));
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut headers: Vec<&str> = COLUMNS.to_vec();
        headers.push("Asset");
        let err = ColumnMap::resolve(&headers).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("Asset".into()));
    }

    #[test]
    fn empty_header_row_rejected() {
        let headers: Vec<String> = Vec::new();
        assert_eq!(ColumnMap::resolve(&headers).unwrap_err(), SchemaError::NoHeader);
    }

    #[test]
    fn metric_accessor_matches_fields() {
        let row = ResultRow {
            asset: "ZN".into(),
            event: "FOMC".into(),
            immediate_return: 0.01,
            post_return: 0.02,
            vol_change: 3.0,
            max_drawdown: -4.0,
            time_to_peak: 15.0,
        };
        let values: Vec<f64> = MetricField::ALL.iter().map(|f| row.metric(*f)).collect();
        assert_eq!(values, vec![0.01, 0.02, 3.0, -4.0, 15.0]);
    }

    #[test]
    fn summary_fields_exclude_post_return() {
        assert!(!MetricField::SUMMARY.contains(&MetricField::PostReturn));
        assert_eq!(MetricField::SUMMARY.len(), 4);
    }
}
