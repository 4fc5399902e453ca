//! Deterministic demo results, so the dashboard runs without the upstream notebook.
//!
//! Each (asset, event) pair draws from its own `StdRng`, seeded by BLAKE3 over
//! (seed, asset, event). Output does not depend on generation order.

use std::fs::File;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::export::{write_detail_csv, ExportError};
use crate::schema::ResultRow;

/// Reaction profile for one instrument.
#[derive(Debug, Clone, Copy)]
struct AssetProfile {
    asset: &'static str,
    /// Typical absolute 30-minute move, fraction.
    move_scale: f64,
    /// Typical minutes to peak.
    peak_minutes: f64,
}

// Rates and FX reprice fastest; equities and commodities drift longer.
const ASSETS: [AssetProfile; 8] = [
    AssetProfile { asset: "ZN", move_scale: 0.0025, peak_minutes: 8.0 },
    AssetProfile { asset: "ZB", move_scale: 0.0040, peak_minutes: 10.0 },
    AssetProfile { asset: "EURUSD", move_scale: 0.0030, peak_minutes: 12.0 },
    AssetProfile { asset: "USDJPY", move_scale: 0.0035, peak_minutes: 14.0 },
    AssetProfile { asset: "ES", move_scale: 0.0060, peak_minutes: 25.0 },
    AssetProfile { asset: "NQ", move_scale: 0.0080, peak_minutes: 28.0 },
    AssetProfile { asset: "GC", move_scale: 0.0050, peak_minutes: 35.0 },
    AssetProfile { asset: "CL", move_scale: 0.0070, peak_minutes: 45.0 },
];

const EVENTS: [&str; 6] = [
    "FOMC 2024-01-31",
    "CPI 2024-02-13",
    "NFP 2024-03-08",
    "FOMC 2024-03-20",
    "CPI 2024-04-10",
    "NFP 2024-05-03",
];

pub const DEFAULT_SEED: u64 = 42;

fn rng_for(seed: u64, asset: &str, event: &str) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(asset.as_bytes());
    hasher.update(&[0]);
    hasher.update(event.as_bytes());
    StdRng::from_seed(*hasher.finalize().as_bytes())
}

/// One row per (event, asset) pair, events outer.
pub fn sample_rows(seed: u64) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(EVENTS.len() * ASSETS.len());
    for event in EVENTS {
        for profile in ASSETS {
            let mut rng = rng_for(seed, profile.asset, event);
            let immediate_return = profile.move_scale * rng.gen_range(-1.5..1.5);
            // 24h return keeps the sign of the first move about two times in three.
            let follow_through = rng.gen_range(-0.5..1.5);
            let post_return = immediate_return * follow_through
                + profile.move_scale * rng.gen_range(-0.5..0.5);
            let vol_change = rng.gen_range(-5.0..60.0);
            let max_drawdown = -(immediate_return.abs() * 100.0 * rng.gen_range(0.2..1.2));
            let time_to_peak = (profile.peak_minutes * rng.gen_range(0.5..1.8)).round();
            rows.push(ResultRow {
                asset: profile.asset.to_string(),
                event: event.to_string(),
                immediate_return,
                post_return,
                vol_change,
                max_drawdown,
                time_to_peak,
            });
        }
    }
    rows
}

/// Write demo rows to `path` as a results CSV; returns the row count.
pub fn write_sample_csv(path: &Path, seed: u64) -> Result<usize, ExportError> {
    let rows = sample_rows(seed);
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_detail_csv(file, &rows)?;
    log::info!("wrote {} sample rows to {}", rows.len(), path.display());
    Ok(rows.len())
}
