//! Spreadsheet parsing implementation.
//!
//! Reads the first sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a
//! [`RowTable`], discovering column names from the sheet's header row.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::LoadErrorKind;
use crate::types::{RowTable, Value};

/// Read the first sheet of the workbook at `path` into a [`RowTable`].
///
/// Behavior:
/// - Uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Discovers one column per non-empty header cell; blank header cells (and
///   the cells under them) are dropped
/// - Converts remaining rows into cells, skipping rows that are entirely empty
pub fn read_first_sheet(path: impl AsRef<Path>) -> Result<RowTable, LoadErrorKind> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadErrorKind::NoSheets)?;
    let range = workbook.worksheet_range(&sheet)?;

    read_sheet_range(&sheet, &range)
}

fn read_sheet_range(sheet: &str, range: &calamine::Range<Data>) -> Result<RowTable, LoadErrorKind> {
    let (header_row_idx, col_idxs, columns) = discover_header(sheet, range)?;

    let mut rows: Vec<Vec<Option<Value>>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }

        let out_row: Vec<Option<Value>> = col_idxs
            .iter()
            .map(|&col_idx| convert_cell(row.get(col_idx).unwrap_or(&Data::Empty)))
            .collect();
        if out_row.iter().all(Option::is_none) {
            continue;
        }
        rows.push(out_row);
    }

    Ok(RowTable::new(columns, rows))
}

/// Locate the header row and build the column list from its non-empty cells.
///
/// Returns the header's row index, the sheet column index behind each
/// discovered column, and the discovered column names in sheet order.
fn discover_header(
    sheet: &str,
    range: &calamine::Range<Data>,
) -> Result<(usize, Vec<usize>, Vec<String>), LoadErrorKind> {
    let mut header: Option<(usize, &[Data])> = None;
    for (idx0, row) in range.rows().enumerate() {
        if row.iter().any(|c| !matches!(c, Data::Empty)) {
            header = Some((idx0, row));
            break;
        }
    }

    let (header_row_idx, header_row) = header.ok_or_else(|| LoadErrorKind::NoHeaderRow {
        sheet: sheet.to_string(),
    })?;

    let mut col_idxs: Vec<usize> = Vec::with_capacity(header_row.len());
    let mut columns: Vec<String> = Vec::with_capacity(header_row.len());
    for (col_idx, cell) in header_row.iter().enumerate() {
        let name = cell_to_header_string(cell);
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        col_idxs.push(col_idx);
        columns.push(name.to_string());
    }

    Ok((header_row_idx, col_idxs, columns))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Empty => "".to_string(),
        other => other.to_string(),
    }
}

/// Convert one data cell into a table cell.
///
/// Empty and error cells become absent. Integral floats collapse to `Int64`
/// (workbook readers surface most numbers as floats even when the sheet shows
/// whole numbers). Date and duration cells keep their display string.
fn convert_cell(c: &Data) -> Option<Value> {
    match c {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Value::Utf8(s.clone())),
        Data::Int(i) => Some(Value::Int64(*i)),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(Value::Int64(*f as i64))
            } else {
                Some(Value::Float64(*f))
            }
        }
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            Some(Value::Utf8(c.to_string()))
        }
    }
}
