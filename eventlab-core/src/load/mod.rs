//! Results file loading and row validation.
//!
//! The file is read once at startup. Format follows the extension:
//! 1. `.xlsx` / `.xlsm` → calamine (feature `xlsx`)
//! 2. `.csv` → csv reader (always available)
//! 3. `.parquet` → polars (feature `parquet`)
//!
//! Every decoder produces the same loosely typed `RawTable`; validation turns
//! it into `ResultRow`s. Bad rows are skipped and reported, never guessed at.

mod delimited;
#[cfg(feature = "parquet")]
mod parquet;
#[cfg(feature = "xlsx")]
mod xlsx;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::{Dataset, LoadReport, LoadedResults, RejectedRow};
use crate::schema::{
    ColumnMap, ResultRow, SchemaError, COL_ASSET, COL_EVENT, COL_IMMEDIATE_RETURN,
    COL_MAX_DRAWDOWN, COL_POST_RETURN, COL_TIME_TO_PEAK, COL_VOL_CHANGE,
};

/// Default results path, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "event_impact_results.xlsx";

/// Supported on-disk encodings of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Xlsx,
    Csv,
    Parquet,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [InputFormat::Xlsx, InputFormat::Csv, InputFormat::Parquet];

    /// Pick the decoder from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(InputFormat::Xlsx),
            Some("csv") => Ok(InputFormat::Csv),
            Some("parquet") | Some("pq") => Ok(InputFormat::Parquet),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputFormat::Xlsx => "xlsx",
            InputFormat::Csv => "csv",
            InputFormat::Parquet => "parquet",
        }
    }

    /// Cargo feature gating this decoder, if any.
    pub fn feature(self) -> Option<&'static str> {
        match self {
            InputFormat::Xlsx => Some("xlsx"),
            InputFormat::Csv => None,
            InputFormat::Parquet => Some("parquet"),
        }
    }

    /// Whether this build can decode the format.
    pub fn is_available(self) -> bool {
        match self {
            InputFormat::Xlsx => cfg!(feature = "xlsx"),
            InputFormat::Csv => true,
            InputFormat::Parquet => cfg!(feature = "parquet"),
        }
    }
}

/// Formats this build can decode.
pub fn available_formats() -> Vec<InputFormat> {
    InputFormat::ALL
        .into_iter()
        .filter(|f| f.is_available())
        .collect()
}

/// Errors that stop the session before anything is rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported results file {}: expected .xlsx, .csv or .parquet", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("cannot read {}: {} support was not compiled in (feature `{feature}`)", path.display(), format.label())]
    DecoderUnavailable {
        path: PathBuf,
        format: InputFormat,
        feature: &'static str,
    },

    #[error("could not read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("invalid header in {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{} has no usable rows ({rejected} rejected)", path.display())]
    Empty { path: PathBuf, rejected: usize },

    #[error("{} has {count} invalid row(s); first at row {}: {}", path.display(), first.line, first.reason)]
    Strict {
        path: PathBuf,
        count: usize,
        first: RejectedRow,
    },
}

impl LoadError {
    /// What the user can do about it, one line per entry.
    pub fn remedy(&self) -> Vec<String> {
        match self {
            LoadError::NotFound { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
                vec![
                    "Run the event study notebook first and export its results:".into(),
                    format!("    all_results.to_excel(\"{name}\", index=False)"),
                    "or point the dashboard at an existing file with --data <FILE>.".into(),
                ]
            }
            LoadError::UnsupportedFormat { .. } => vec![
                "Export the results as .xlsx, .csv or .parquet.".into(),
            ],
            LoadError::DecoderUnavailable { feature, .. } => {
                let mut lines = vec![
                    format!("Rebuild with the decoder enabled: cargo build --features {feature}"),
                    "or export the results as CSV:".into(),
                    "    all_results.to_csv(\"event_impact_results.csv\", index=False)".into(),
                ];
                lines.extend(environment_diagnostic());
                lines
            }
            LoadError::Read { .. } => environment_diagnostic(),
            LoadError::Schema { .. } => vec![format!(
                "Expected columns: {}",
                crate::schema::COLUMNS.join(", ")
            )],
            LoadError::Empty { .. } | LoadError::Strict { .. } => vec![
                "Run `eventlab check` for the full list of rejected rows.".into(),
            ],
        }
    }
}

/// Executable, version and compiled-in decoders.
pub fn environment_diagnostic() -> Vec<String> {
    let exe = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|e| format!("unknown ({e})"));
    let decoders: Vec<&str> = available_formats().iter().map(|f| f.label()).collect();
    vec![
        format!("executable: {exe}"),
        format!("eventlab-core version: {}", env!("CARGO_PKG_VERSION")),
        format!("decoders: {}", decoders.join(", ")),
    ]
}

/// Options controlling validation.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Treat any rejected row as a fatal load error.
    pub strict: bool,
}

/// Load and validate the results file.
///
/// This is the one entry point for the binaries; it runs once per session.
pub fn load_results(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<LoadedResults, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = InputFormat::from_path(path)?;
    let table = decode(format, path)?;
    let validated = validate(table).map_err(|source| LoadError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    for rej in &validated.rejected {
        log::warn!("{}: row {} rejected: {}", path.display(), rej.line, rej.reason);
    }

    if opts.strict {
        if let Some(first) = validated.rejected.first() {
            return Err(LoadError::Strict {
                path: path.to_path_buf(),
                count: validated.rejected.len(),
                first: first.clone(),
            });
        }
    }

    if validated.rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
            rejected: validated.rejected.len(),
        });
    }

    log::info!(
        "loaded {} rows from {} ({} rejected)",
        validated.rows.len(),
        path.display(),
        validated.rejected.len()
    );

    let report = LoadReport {
        source: path.to_path_buf(),
        format,
        rows_read: validated.rows_read,
        rejected: validated.rejected,
    };
    Ok(LoadedResults {
        dataset: Dataset::new(validated.rows, path),
        report,
    })
}

fn decode(format: InputFormat, path: &Path) -> Result<RawTable, LoadError> {
    match format {
        InputFormat::Csv => delimited::decode(path),
        InputFormat::Xlsx => {
            #[cfg(feature = "xlsx")]
            {
                xlsx::decode(path)
            }
            #[cfg(not(feature = "xlsx"))]
            {
                Err(unavailable(path, format))
            }
        }
        InputFormat::Parquet => {
            #[cfg(feature = "parquet")]
            {
                parquet::decode(path)
            }
            #[cfg(not(feature = "parquet"))]
            {
                Err(unavailable(path, format))
            }
        }
    }
}

#[cfg(not(all(feature = "xlsx", feature = "parquet")))]
fn unavailable(path: &Path, format: InputFormat) -> LoadError {
    LoadError::DecoderUnavailable {
        path: path.to_path_buf(),
        format,
        feature: format.feature().unwrap_or("default"),
    }
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::Read {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

// ── Raw table + validation ──────────────────────────────────────────

/// A decoded cell before typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    /// 1-based row number in the source, header included.
    pub line: usize,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

struct Validated {
    rows: Vec<ResultRow>,
    rejected: Vec<RejectedRow>,
    rows_read: usize,
}

fn validate(table: RawTable) -> Result<Validated, SchemaError> {
    let map = ColumnMap::resolve(&table.headers)?;
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut rejected = Vec::new();
    let mut rows_read = 0;

    for raw in table.rows {
        if raw.cells.iter().all(Cell::is_blank) {
            continue;
        }
        rows_read += 1;
        match build_row(&map, &raw.cells) {
            Ok(row) => rows.push(row),
            Err((asset, reason)) => rejected.push(RejectedRow {
                line: raw.line,
                asset,
                reason,
            }),
        }
    }

    Ok(Validated {
        rows,
        rejected,
        rows_read,
    })
}

fn build_row(map: &ColumnMap, cells: &[Cell]) -> Result<ResultRow, (Option<String>, String)> {
    let cell = |column: &str| cell_at(map, cells, column);

    let asset = text_field(cell(COL_ASSET), COL_ASSET);
    let known_asset = asset.as_ref().ok().cloned();
    let with_asset = |reason: String| (known_asset.clone(), reason);

    let asset = asset.map_err(with_asset)?;
    let event = text_field(cell(COL_EVENT), COL_EVENT).map_err(with_asset)?;
    let immediate_return =
        number_field(cell(COL_IMMEDIATE_RETURN), COL_IMMEDIATE_RETURN).map_err(with_asset)?;
    let post_return = number_field(cell(COL_POST_RETURN), COL_POST_RETURN).map_err(with_asset)?;
    let vol_change = number_field(cell(COL_VOL_CHANGE), COL_VOL_CHANGE).map_err(with_asset)?;
    let max_drawdown =
        number_field(cell(COL_MAX_DRAWDOWN), COL_MAX_DRAWDOWN).map_err(with_asset)?;
    let time_to_peak =
        number_field(cell(COL_TIME_TO_PEAK), COL_TIME_TO_PEAK).map_err(with_asset)?;

    if time_to_peak < 0.0 {
        return Err(with_asset(format!(
            "negative '{COL_TIME_TO_PEAK}' ({time_to_peak})"
        )));
    }

    Ok(ResultRow {
        asset,
        event,
        immediate_return,
        post_return,
        vol_change,
        max_drawdown,
        time_to_peak,
    })
}

static EMPTY_CELL: Cell = Cell::Empty;

fn cell_at<'a>(map: &ColumnMap, cells: &'a [Cell], column: &str) -> &'a Cell {
    map.index_of(column)
        .and_then(|i| cells.get(i))
        .unwrap_or(&EMPTY_CELL)
}

fn text_field(cell: &Cell, column: &str) -> Result<String, String> {
    match cell {
        Cell::Text(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Cell::Number(n) => Ok(n.to_string()),
        _ => Err(format!("missing value for '{column}'")),
    }
}

fn number_field(cell: &Cell, column: &str) -> Result<f64, String> {
    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Text(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("non-numeric value '{}' for '{column}'", s.trim())),
        _ => Err(format!("missing value for '{column}'")),
    }
}
