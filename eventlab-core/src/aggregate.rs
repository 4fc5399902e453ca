//! Per-asset summary: group-by-asset arithmetic mean.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{MetricField, ResultRow};

/// Decimal places kept in summary values.
pub const SUMMARY_DECIMALS: i32 = 4;

/// Mean statistics for one asset over the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub asset: String,
    pub immediate_return: f64,
    pub vol_change: f64,
    pub max_drawdown: f64,
    pub time_to_peak: f64,
    /// Number of rows averaged.
    pub observations: usize,
}

impl SummaryRow {
    pub fn metric(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::ImmediateReturn => Some(self.immediate_return),
            MetricField::VolChange => Some(self.vol_change),
            MetricField::MaxDrawdown => Some(self.max_drawdown),
            MetricField::TimeToPeak => Some(self.time_to_peak),
            MetricField::PostReturn => None,
        }
    }
}

#[derive(Default)]
struct Sums {
    immediate_return: f64,
    vol_change: f64,
    max_drawdown: f64,
    time_to_peak: f64,
    count: usize,
}

/// Group rows by asset and average the summary metrics.
///
/// Output is ordered by asset. Assets with no rows produce no output, so an
/// empty input yields an empty summary rather than rows of NaN.
pub fn summarize<'a, I>(rows: I) -> Vec<SummaryRow>
where
    I: IntoIterator<Item = &'a ResultRow>,
{
    let mut groups: BTreeMap<&'a str, Sums> = BTreeMap::new();
    for row in rows {
        let s = groups.entry(row.asset.as_str()).or_default();
        s.immediate_return += row.immediate_return;
        s.vol_change += row.vol_change;
        s.max_drawdown += row.max_drawdown;
        s.time_to_peak += row.time_to_peak;
        s.count += 1;
    }

    groups
        .into_iter()
        .map(|(asset, s)| {
            let n = s.count as f64;
            SummaryRow {
                asset: asset.to_string(),
                immediate_return: round_to(s.immediate_return / n, SUMMARY_DECIMALS),
                vol_change: round_to(s.vol_change / n, SUMMARY_DECIMALS),
                max_drawdown: round_to(s.max_drawdown / n, SUMMARY_DECIMALS),
                time_to_peak: round_to(s.time_to_peak / n, SUMMARY_DECIMALS),
                observations: s.count,
            }
        })
        .collect()
}

/// Round to `decimals` places, exact halves to the even neighbour (numpy's
/// rule, so `0.00125` → `0.0012`). Non-finite values pass through.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    round_half_even(value * scale) / scale
}

fn round_half_even(x: f64) -> f64 {
    let r = x.round();
    if (r - x).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        r
    }
}
