//! Display rules for every numeric field.
//!
//! The TUI and the CLI print through this table so both surfaces agree on
//! units and precision.

use crate::aggregate::{round_to, SummaryRow, SUMMARY_DECIMALS};
use crate::schema::{MetricField, ResultRow, COL_ASSET, COL_EVENT};

/// How a number is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRule {
    /// Fraction shown as a percentage: `0.0123` → `1.23%`.
    Percent { decimals: usize },
    /// Already in percentage points, `%` appended: `3.44` → `3.4%`.
    PercentPoints { decimals: usize },
    /// Whole minutes: `14.6` → `15`.
    Minutes,
    /// Plain fixed-point.
    Fixed { decimals: usize },
}

/// Detail-table rules, one per metric column.
pub const DETAIL_FORMATS: [(MetricField, DisplayRule); 5] = [
    (MetricField::ImmediateReturn, DisplayRule::Percent { decimals: 2 }),
    (MetricField::PostReturn, DisplayRule::Percent { decimals: 2 }),
    (MetricField::VolChange, DisplayRule::PercentPoints { decimals: 1 }),
    (MetricField::MaxDrawdown, DisplayRule::PercentPoints { decimals: 2 }),
    (MetricField::TimeToPeak, DisplayRule::Minutes),
];

/// Summary values are shown at their rounded precision.
pub const SUMMARY_RULE: DisplayRule = DisplayRule::Fixed {
    decimals: SUMMARY_DECIMALS as usize,
};

/// Normalized prices on the synthetic path.
pub const PRICE_RULE: DisplayRule = DisplayRule::Fixed { decimals: 6 };

impl DisplayRule {
    pub fn apply(self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        match self {
            DisplayRule::Percent { decimals } => format!("{:.*}%", decimals, value * 100.0),
            DisplayRule::PercentPoints { decimals } => format!("{:.*}%", decimals, value),
            // Halves go to the even minute; `+ 0.0` folds -0 into 0.
            DisplayRule::Minutes => format!("{:.0}", round_to(value, 0) + 0.0),
            DisplayRule::Fixed { decimals } => format!("{:.*}", decimals, value),
        }
    }
}

/// Detail-table rule for a metric.
pub fn detail_rule(field: MetricField) -> DisplayRule {
    DETAIL_FORMATS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, rule)| *rule)
        .unwrap_or(DisplayRule::Fixed { decimals: 4 })
}

pub fn detail_headers() -> Vec<&'static str> {
    let mut headers = vec![COL_ASSET, COL_EVENT];
    headers.extend(MetricField::ALL.iter().map(|f| f.column()));
    headers
}

/// Asset, event, then every metric through its detail rule.
pub fn format_detail_row(row: &ResultRow) -> Vec<String> {
    let mut cells = vec![row.asset.clone(), row.event.clone()];
    cells.extend(
        MetricField::ALL
            .iter()
            .map(|&f| detail_rule(f).apply(row.metric(f))),
    );
    cells
}

pub fn summary_headers() -> Vec<&'static str> {
    let mut headers = vec![COL_ASSET];
    headers.extend(MetricField::SUMMARY.iter().map(|f| f.column()));
    headers
}

pub fn format_summary_row(row: &SummaryRow) -> Vec<String> {
    let mut cells = vec![row.asset.clone()];
    cells.extend(
        MetricField::SUMMARY
            .iter()
            .map(|&f| SUMMARY_RULE.apply(row.metric(f).unwrap_or(f64::NAN))),
    );
    cells
}
