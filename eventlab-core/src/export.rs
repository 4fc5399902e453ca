//! Export of the current view: summary, detail and paths as CSV plus a JSON manifest.
//!
//! `detail.csv` uses the results-file headers, so it loads back as a
//! results file of its own.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::SummaryRow;
use crate::dataset::Dataset;
use crate::filter::Selection;
use crate::path::PricePath;
use crate::schema::{MetricField, ResultRow, COLUMNS};
use crate::DashboardView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialize manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Row counts written to each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCounts {
    pub detail: usize,
    pub summary: usize,
    pub paths: usize,
}

/// `manifest.json`: where the numbers came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub data_file: PathBuf,
    pub fingerprint: String,
    pub selection: Selection,
    pub rows: ExportCounts,
    pub created_at: DateTime<Utc>,
    pub version: String,
}

impl ExportManifest {
    pub fn new(
        dataset: &Dataset,
        selection: &Selection,
        view: &DashboardView,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            data_file: dataset.source().to_path_buf(),
            fingerprint: dataset.fingerprint().to_string(),
            selection: selection.clone(),
            rows: ExportCounts {
                detail: view.detail.len(),
                summary: view.summary.len(),
                paths: view.paths.iter().map(|p| p.points.len()).sum(),
            },
            created_at,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Files produced by [`export_view`].
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub summary_csv: PathBuf,
    pub detail_csv: PathBuf,
    pub paths_csv: PathBuf,
    pub manifest: PathBuf,
}

/// Write all four files into `out_dir`, creating it if needed.
pub fn export_view(
    out_dir: &Path,
    dataset: &Dataset,
    selection: &Selection,
    view: &DashboardView,
) -> Result<ExportPaths, ExportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let paths = ExportPaths {
        summary_csv: out_dir.join("summary.csv"),
        detail_csv: out_dir.join("detail.csv"),
        paths_csv: out_dir.join("paths.csv"),
        manifest: out_dir.join("manifest.json"),
    };

    write_summary_csv(create(&paths.summary_csv)?, &view.summary)?;
    write_detail_csv(create(&paths.detail_csv)?, &view.detail)?;
    write_paths_csv(create(&paths.paths_csv)?, &view.paths)?;

    let manifest = ExportManifest::new(dataset, selection, view, Utc::now());
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&paths.manifest, json).map_err(|source| ExportError::Io {
        path: paths.manifest.clone(),
        source,
    })?;

    log::info!(
        "exported {} detail rows, {} summary rows to {}",
        manifest.rows.detail,
        manifest.rows.summary,
        out_dir.display()
    );
    Ok(paths)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_summary_csv<W: Write>(out: W, summary: &[SummaryRow]) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(out);
    let mut header = vec!["asset"];
    header.extend(MetricField::SUMMARY.iter().map(|f| f.key()));
    header.push("observations");
    w.write_record(&header)?;
    for row in summary {
        let mut record = vec![row.asset.clone()];
        record.extend(
            MetricField::SUMMARY
                .iter()
                .map(|&f| row.metric(f).unwrap_or(f64::NAN).to_string()),
        );
        record.push(row.observations.to_string());
        w.write_record(&record)?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_detail_csv<W: Write>(out: W, rows: &[ResultRow]) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(COLUMNS)?;
    for row in rows {
        let mut record = vec![row.asset.clone(), row.event.clone()];
        record.extend(MetricField::ALL.iter().map(|&f| row.metric(f).to_string()));
        w.write_record(&record)?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Long format: one line per (asset, minute).
pub fn write_paths_csv<W: Write>(out: W, paths: &[PricePath]) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["asset", "minutes", "price"])?;
    for path in paths {
        for p in &path.points {
            w.write_record([
                path.asset.clone(),
                p.minutes.to_string(),
                p.price.to_string(),
            ])?;
        }
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}
