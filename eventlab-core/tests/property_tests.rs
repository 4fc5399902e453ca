//! Property tests for the recompute pipeline.
//!
//! Uses proptest to verify:
//! 1. Filtering is a pure subset, kept iff asset and event are both selected
//! 2. Summary has one row per distinct asset, each field the rounded mean
//! 3. Path generation is deterministic and always 49 samples
//! 4. A zero immediate return leaves every post-event sample at exactly 1.0

use std::collections::BTreeSet;

use proptest::prelude::*;

use eventlab_core::aggregate::round_to;
use eventlab_core::path::{time_axis, SAMPLE_COUNT};
use eventlab_core::{filter_rows, summarize, synthetic_path, ResultRow, Selection};

// ── Strategies (proptest) ────────────────────────────────────────────

const ASSETS: [&str; 4] = ["ZN", "ES", "EURUSD", "GC"];
const EVENTS: [&str; 3] = ["FOMC", "CPI", "NFP"];

fn arb_row() -> impl Strategy<Value = ResultRow> {
    (
        0..ASSETS.len(),
        0..EVENTS.len(),
        -0.05..0.05_f64,
        -0.05..0.05_f64,
        -20.0..80.0_f64,
        -5.0..0.0_f64,
        0.0..240.0_f64,
    )
        .prop_map(|(a, e, imm, post, vol, dd, ttp)| ResultRow {
            asset: ASSETS[a].to_string(),
            event: EVENTS[e].to_string(),
            immediate_return: imm,
            post_return: post,
            vol_change: vol,
            max_drawdown: dd,
            time_to_peak: ttp,
        })
}

fn arb_selection() -> impl Strategy<Value = Selection> {
    (
        proptest::sample::subsequence(ASSETS.to_vec(), 0..=ASSETS.len()),
        proptest::sample::subsequence(EVENTS.to_vec(), 0..=EVENTS.len()),
    )
        .prop_map(|(a, e)| Selection::new(a, e))
}

// ── 1. Filter subset ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn filter_is_exact_subset(
        rows in proptest::collection::vec(arb_row(), 0..60),
        sel in arb_selection(),
    ) {
        let kept = filter_rows(&rows, &sel);
        let expected: Vec<&ResultRow> = rows
            .iter()
            .filter(|r| sel.assets.contains(&r.asset) && sel.events.contains(&r.event))
            .collect();
        prop_assert_eq!(kept, expected);
    }
}

// ── 2. Summary means ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn summary_is_rounded_mean_per_asset(rows in proptest::collection::vec(arb_row(), 1..60)) {
        let summary = summarize(&rows);
        let distinct: BTreeSet<&str> = rows.iter().map(|r| r.asset.as_str()).collect();
        prop_assert_eq!(summary.len(), distinct.len());

        for s in &summary {
            let group: Vec<&ResultRow> = rows.iter().filter(|r| r.asset == s.asset).collect();
            let n = group.len() as f64;
            let mean = |f: fn(&ResultRow) -> f64| round_to(group.iter().map(|r| f(r)).sum::<f64>() / n, 4);
            prop_assert_eq!(s.observations, group.len());
            prop_assert_eq!(s.immediate_return, mean(|r| r.immediate_return));
            prop_assert_eq!(s.vol_change, mean(|r| r.vol_change));
            prop_assert_eq!(s.max_drawdown, mean(|r| r.max_drawdown));
            prop_assert_eq!(s.time_to_peak, mean(|r| r.time_to_peak));
        }
    }
}

// ── 3/4. Path generator ──────────────────────────────────────────────

proptest! {
    #[test]
    fn path_is_deterministic(imm in -0.1..0.1_f64, ttp in -60.0..300.0_f64) {
        let a = synthetic_path(imm, ttp);
        let b = synthetic_path(imm, ttp);
        prop_assert_eq!(a.len(), SAMPLE_COUNT);
        let axis = time_axis();
        for ((x, y), t) in a.iter().zip(&b).zip(&axis) {
            prop_assert_eq!(x.price.to_bits(), y.price.to_bits());
            prop_assert_eq!(x.minutes, *t);
        }
    }

    #[test]
    fn zero_return_is_flat_after_announcement(ttp in -60.0..300.0_f64) {
        for p in synthetic_path(0.0, ttp).iter().filter(|p| p.minutes >= 0.0) {
            prop_assert_eq!(p.price, 1.0);
        }
    }
}
