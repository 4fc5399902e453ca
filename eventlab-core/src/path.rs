//! Synthetic price path around the announcement.
//!
//! An illustrative normalized-price curve built from two per-asset summary
//! scalars (mean immediate return, mean time to peak). It is a visual
//! approximation of the averaged statistics, not a model of price dynamics.
//!
//! Shape, over minutes `t` in [-60, 180] every 5 minutes:
//! - `t < 0`: straight line from `1 - 0.001` up to `1.0` across the pre-event samples
//! - `t >= 0`: `1 + r * (1 - exp(-t / 30))`
//! - every `t`: `+ 1.2 * r * exp(-|t - peak| / 40)`
//!
//! No input validation: a negative peak centres the bump before the
//! announcement, and non-finite inputs give non-finite samples.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::SummaryRow;

/// First sample, minutes relative to the announcement.
pub const WINDOW_START_MIN: i32 = -60;
/// Last sample (inclusive).
pub const WINDOW_END_MIN: i32 = 180;
pub const STEP_MIN: i32 = 5;
/// Number of samples on the time axis.
pub const SAMPLE_COUNT: usize = ((WINDOW_END_MIN - WINDOW_START_MIN) / STEP_MIN) as usize + 1;

/// Offset of the earliest pre-event sample from 1.0.
pub const PRE_EVENT_DRIFT: f64 = -0.001;
/// Time constant of the post-event approach, minutes.
pub const REACTION_TAU_MIN: f64 = 30.0;
/// Bump amplitude as a multiple of the immediate return.
pub const PEAK_MULTIPLIER: f64 = 1.2;
/// Decay constant of the bump on both sides of the peak, minutes.
pub const PEAK_DECAY_MIN: f64 = 40.0;

/// One sample of a synthetic path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Minutes from the announcement.
    pub minutes: f64,
    /// Price normalized to 1.0.
    pub price: f64,
}

/// The synthetic path for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePath {
    pub asset: String,
    pub points: Vec<PathPoint>,
}

impl PricePath {
    /// (minutes, price) pairs, the shape chart datasets take.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.minutes, p.price)).collect()
    }

    /// Lowest and highest finite price on the path; `None` when there is none.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(|p| p.price)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}

/// Sample offsets: -60, -55, ..., 180.
pub fn time_axis() -> Vec<f64> {
    (0..SAMPLE_COUNT)
        .map(|i| (WINDOW_START_MIN + STEP_MIN * i as i32) as f64)
        .collect()
}

/// Evenly spaced values from `start` to `stop` inclusive; the last equals `stop` exactly.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Build the path for one pair of summary scalars.
pub fn synthetic_path(immediate_return: f64, time_to_peak: f64) -> Vec<PathPoint> {
    let axis = time_axis();
    let mut path = vec![1.0_f64; axis.len()];

    let pre_count = axis.iter().filter(|t| **t < 0.0).count();
    let drift = linspace(PRE_EVENT_DRIFT, 0.0, pre_count);
    let mut pre = drift.into_iter();

    for (price, &t) in path.iter_mut().zip(&axis) {
        if t < 0.0 {
            if let Some(d) = pre.next() {
                *price = 1.0 + d;
            }
        } else {
            *price = 1.0 + immediate_return * (1.0 - (-t / REACTION_TAU_MIN).exp());
        }
    }

    let peak_effect = immediate_return * PEAK_MULTIPLIER;
    for (price, &t) in path.iter_mut().zip(&axis) {
        *price += peak_effect * (-(t - time_to_peak).abs() / PEAK_DECAY_MIN).exp();
    }

    axis.into_iter()
        .zip(path)
        .map(|(minutes, price)| PathPoint { minutes, price })
        .collect()
}

/// One path per summary row, in summary order.
///
/// Each asset reads only its own scalars, so the work is spread across rayon's
/// pool; `collect` keeps the input order.
pub fn price_paths(summary: &[SummaryRow]) -> Vec<PricePath> {
    summary
        .par_iter()
        .map(|row| PricePath {
            asset: row.asset.clone(),
            points: synthetic_path(row.immediate_return, row.time_to_peak),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_at(points: &[PathPoint], minutes: f64) -> f64 {
        points
            .iter()
            .find(|p| p.minutes == minutes)
            .map(|p| p.price)
            .unwrap()
    }

    #[test]
    fn axis_has_49_samples_from_minus_60_to_180() {
        let axis = time_axis();
        assert_eq!(SAMPLE_COUNT, 49);
        assert_eq!(axis.len(), 49);
        assert_eq!(axis[0], -60.0);
        assert_eq!(axis[12], 0.0);
        assert_eq!(axis[48], 180.0);
        assert!(axis.windows(2).all(|w| w[1] - w[0] == 5.0));
    }

    #[test]
    fn worked_example_at_peak() {
        let points = synthetic_path(0.01, 15.0);
        let expected = 1.0 + 0.01 * (1.0 - (-0.5_f64).exp()) + 0.012;
        let got = price_at(&points, 15.0);
        assert!((got - expected).abs() < 1e-15);
        assert!((got - 1.01594).abs() < 1e-5);
    }

    #[test]
    fn zero_return_has_no_reaction() {
        let points = synthetic_path(0.0, 15.0);
        for p in points.iter().filter(|p| p.minutes >= 0.0) {
            assert_eq!(p.price, 1.0);
        }
        // Pre-event samples carry only the fixed drift ramp.
        assert_eq!(price_at(&points, -60.0), 1.0 + PRE_EVENT_DRIFT);
        assert_eq!(price_at(&points, -5.0), 1.0);
    }

    #[test]
    fn pre_event_ramp_is_linear() {
        let points = synthetic_path(0.0, 0.0);
        let pre: Vec<f64> = points
            .iter()
            .filter(|p| p.minutes < 0.0)
            .map(|p| p.price)
            .collect();
        assert_eq!(pre.len(), 12);
        let step = 0.001 / 11.0;
        for w in pre.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn deterministic_bit_for_bit() {
        let a = synthetic_path(-0.0037, 22.5);
        let b = synthetic_path(-0.0037, 22.5);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.price.to_bits(), y.price.to_bits());
        }
    }

    #[test]
    fn bump_centres_on_peak_time() {
        // With a large peak offset the bump dominates; price peaks near it.
        let points = synthetic_path(0.01, 100.0);
        let best = points
            .iter()
            .max_by(|a, b| a.price.total_cmp(&b.price))
            .unwrap();
        assert_eq!(best.minutes, 100.0);
    }

    #[test]
    fn zero_peak_centres_at_announcement() {
        let points = synthetic_path(0.01, 0.0);
        assert_eq!(price_at(&points, 0.0), 1.0 + 0.012);
    }

    #[test]
    fn negative_peak_is_accepted() {
        let points = synthetic_path(0.01, -30.0);
        let at = price_at(&points, -30.0);
        let pre_drift = 1.0 + PRE_EVENT_DRIFT + 6.0 * (0.001 / 11.0);
        assert!((at - (pre_drift + 0.012)).abs() < 1e-12);
    }

    #[test]
    fn negative_return_mirrors_reaction() {
        let up = synthetic_path(0.01, 20.0);
        let down = synthetic_path(-0.01, 20.0);
        for (u, d) in up.iter().zip(&down).filter(|(u, _)| u.minutes >= 0.0) {
            assert!(((u.price - 1.0) + (d.price - 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn non_finite_inputs_propagate() {
        let points = synthetic_path(f64::NAN, 10.0);
        assert!(points.iter().all(|p| p.price.is_nan()));
        let points = synthetic_path(0.01, f64::NAN);
        assert!(points.iter().all(|p| p.price.is_nan()));
    }

    #[test]
    fn price_paths_keep_summary_order() {
        let summary: Vec<SummaryRow> = ["CL", "ES", "ZN"]
            .iter()
            .enumerate()
            .map(|(i, a)| SummaryRow {
                asset: a.to_string(),
                immediate_return: 0.001 * i as f64,
                vol_change: 0.0,
                max_drawdown: 0.0,
                time_to_peak: 10.0,
                observations: 1,
            })
            .collect();
        let paths = price_paths(&summary);
        let names: Vec<&str> = paths.iter().map(|p| p.asset.as_str()).collect();
        assert_eq!(names, vec!["CL", "ES", "ZN"]);
        assert!(paths.iter().all(|p| p.points.len() == SAMPLE_COUNT));
        assert_eq!(paths[1].points, synthetic_path(0.001, 10.0));
    }

    #[test]
    fn bounds_cover_all_samples() {
        let path = PricePath {
            asset: "ZN".into(),
            points: synthetic_path(0.01, 15.0),
        };
        let (lo, hi) = path.price_bounds().unwrap();
        assert_eq!(lo, 1.0 + PRE_EVENT_DRIFT + 0.012 * (-75.0_f64 / 40.0).exp());
        assert!(hi > 1.015);
        assert_eq!(path.xy().len(), SAMPLE_COUNT);
    }

    #[test]
    fn bounds_skip_non_finite_prices() {
        let mut points = synthetic_path(0.0, 0.0);
        points[0].price = f64::INFINITY;
        points[1].price = f64::NAN;
        let path = PricePath {
            asset: "ZN".into(),
            points,
        };
        let (lo, hi) = path.price_bounds().unwrap();
        assert!(lo.is_finite() && hi == 1.0);

        let nan = PricePath {
            asset: "ZN".into(),
            points: synthetic_path(f64::NAN, 0.0),
        };
        assert_eq!(nan.price_bounds(), None);
        assert_eq!(PricePath { asset: "ZN".into(), points: Vec::new() }.price_bounds(), None);
    }
}
