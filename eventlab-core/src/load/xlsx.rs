//! Excel decoder (first worksheet, first non-empty row is the header).

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use super::{read_error, Cell, LoadError, RawRow, RawTable};

pub(super) fn decode(path: &Path) -> Result<RawTable, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| read_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| read_error(path, "workbook has no worksheets"))?
        .map_err(|e| read_error(path, e))?;

    // Sheet row index of the range's first row (0-based).
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows_iter = range.rows();

    let headers: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(RawTable::default()),
    };

    let rows: Vec<RawRow> = rows_iter
        .enumerate()
        .map(|(offset, cells)| RawRow {
            // Header sits at first_row; sheet rows are 1-based for users.
            line: first_row + offset + 2,
            cells: cells.iter().map(to_cell).collect(),
        })
        .collect();

    log::debug!("{}: decoded {} worksheet rows", path.display(), rows.len());
    Ok(RawTable { headers, rows })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        other => Cell::Text(other.to_string()),
    }
}
