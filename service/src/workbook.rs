//! Workbook reader
//!
//! Opens xlsx/xls/ods containers with `calamine` and turns every sheet into
//! rows of text cells. Rows keep their absolute column positions and are
//! trimmed of trailing empty cells, so a row is only as wide as its last
//! non-empty cell. A data row with a blank annotation cell comes back no
//! wider than the header, or narrower when its last fields are blank too.

use crate::batch::SheetInput;
use calamine::{Data, Range, Reader, open_workbook_auto};
use sheet2lua_core::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Text rows of one worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    /// Sheet name
    pub name: String,
    /// Rows of text cells
    pub rows: Vec<RawRow>,
}

impl SheetData {
    /// Pair the rows with a preamble source label
    #[must_use]
    pub fn into_input(self, source_label: impl Into<String>) -> SheetInput {
        SheetInput::new(self.name, source_label, self.rows)
    }
}

/// Read every sheet of a workbook, or only the named ones
///
/// Sheets come back in workbook order.
///
/// # Errors
///
/// Returns `Sheet2LuaError::Workbook` if the container cannot be opened, a
/// sheet cannot be read, or a requested sheet does not exist
pub fn read_workbook(path: &Path, only: &[String]) -> Result<Vec<SheetData>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        Sheet2LuaError::workbook(format!("Failed to open {}: {e}", path.display()))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    if let Some(missing) = only.iter().find(|name| !sheet_names.contains(*name)) {
        return Err(Sheet2LuaError::workbook(format!(
            "Sheet '{missing}' not found in {}",
            path.display()
        )));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        if !only.is_empty() && !only.contains(&name) {
            continue;
        }
        let range = workbook.worksheet_range(&name).map_err(|e| {
            Sheet2LuaError::workbook(format!("Failed to read sheet '{name}': {e}"))
        })?;
        let rows = range_to_rows(&range);
        debug!("Read sheet '{}' with {} rows", name, rows.len());
        sheets.push(SheetData { name, rows });
    }

    info!("Read {} sheets from {}", sheets.len(), path.display());
    Ok(sheets)
}

/// Convert a calamine range into absolute-positioned, right-trimmed text rows
#[must_use]
pub fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let leading_cells = start_col as usize;

    let mut rows: Vec<RawRow> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); leading_cells];
        row.extend(cells.iter().map(cell_to_string));
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        rows.push(row);
    }

    rows
}

/// Text of a single cell
#[must_use]
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::Error(e) => format!("#{e:?}"),
    }
}

/// Integral floats print without a fractional part
#[allow(clippy::cast_possible_truncation)]
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
