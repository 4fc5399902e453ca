//! Speed-of-pricing ranking: asset vs mean time to peak.
//!
//! Fastest pricing = lowest time to peak.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregate::SummaryRow;

/// Bar order in the speed chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingOrder {
    /// Summary order (ascending asset).
    #[default]
    Alphabetical,
    /// Ascending time to peak, ties broken by asset.
    Fastest,
}

impl RankingOrder {
    pub fn label(self) -> &'static str {
        match self {
            RankingOrder::Alphabetical => "alphabetical",
            RankingOrder::Fastest => "fastest",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            RankingOrder::Alphabetical => RankingOrder::Fastest,
            RankingOrder::Fastest => RankingOrder::Alphabetical,
        }
    }
}

impl std::str::FromStr for RankingOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alphabetical" | "alpha" => Ok(RankingOrder::Alphabetical),
            "fastest" | "speed" => Ok(RankingOrder::Fastest),
            other => Err(format!(
                "unknown ranking order '{other}' (expected alphabetical or fastest)"
            )),
        }
    }
}

/// One bar of the speed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedBar {
    pub asset: String,
    /// Mean time to peak, minutes.
    pub time_to_peak: f64,
}

pub fn speed_ranking(summary: &[SummaryRow], order: RankingOrder) -> Vec<SpeedBar> {
    let mut bars: Vec<SpeedBar> = summary
        .iter()
        .map(|s| SpeedBar {
            asset: s.asset.clone(),
            time_to_peak: s.time_to_peak,
        })
        .collect();
    if order == RankingOrder::Fastest {
        bars.sort_by(|a, b| {
            by_speed(a.time_to_peak, b.time_to_peak).then_with(|| a.asset.cmp(&b.asset))
        });
    }
    bars
}

/// Ascending, with NaN of either sign after every number and equal to other NaNs.
fn by_speed(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (nan_a, nan_b) => nan_a.cmp(&nan_b),
    }
}
