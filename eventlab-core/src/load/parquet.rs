//! Parquet decoder.
//!
//! Only the seven schema columns are materialized. Text columns are cast to
//! String and metric columns to Float64; values that fail the cast come back
//! null and are reported as missing by validation.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use super::{read_error, Cell, LoadError, RawRow, RawTable};
use crate::schema::{ColumnMap, COLUMNS, COL_ASSET, COL_EVENT};

pub(super) fn decode(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| read_error(path, e))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    // Missing columns surface as a schema error with the real header list.
    if ColumnMap::resolve(&names).is_err() {
        return Ok(RawTable {
            headers: names,
            rows: Vec::new(),
        });
    }

    let mut columns: Vec<Vec<Cell>> = Vec::with_capacity(COLUMNS.len());
    for name in COLUMNS {
        let col = df.column(name).map_err(|e| read_error(path, e))?;
        let cells = if name == COL_ASSET || name == COL_EVENT {
            text_cells(col)
        } else {
            number_cells(col)
        }
        .map_err(|e| read_error(path, format!("column '{name}': {e}")))?;
        columns.push(cells);
    }

    let rows = (0..df.height())
        .map(|i| RawRow {
            line: i + 2,
            cells: columns.iter().map(|c| c[i].clone()).collect(),
        })
        .collect::<Vec<_>>();

    log::debug!("{}: decoded {} parquet rows", path.display(), rows.len());
    Ok(RawTable {
        headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

fn text_cells(col: &Column) -> PolarsResult<Vec<Cell>> {
    let cast = col.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map_or(Cell::Empty, |s| Cell::Text(s.to_string())))
        .collect())
}

fn number_cells(col: &Column) -> PolarsResult<Vec<Cell>> {
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.map_or(Cell::Empty, Cell::Number))
        .collect())
}
