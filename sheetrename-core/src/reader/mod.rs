//! Excel/ODS file reader using calamine

use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use chrono::Timelike;
use std::path::Path;
use tracing::debug;

pub mod table;

pub use table::{CellValue, SpreadsheetRow, Table};

/// Spreadsheet extensions calamine can open
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read the configured sheet of a spreadsheet into a table
///
/// The header line provides column names; every non-blank line after it
/// becomes a row.
pub fn read_table<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::format(
            path,
            format!(
                "unsupported file type '.{}' (expected one of: {})",
                extension,
                SUPPORTED_EXTENSIONS.join(", ")
            ),
        ));
    }

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| Error::format(path, e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match &config.sheet {
        Some(name) if sheet_names.contains(name) => name.clone(),
        Some(name) => {
            return Err(Error::format(
                path,
                format!(
                    "sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                ),
            ));
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| Error::format(path, "workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::format(path, e.to_string()))?;

    let table = parse_range(&range, config.header_row)
        .ok_or_else(|| {
            Error::format(
                path,
                format!(
                    "sheet '{}' has no header at or after row {}",
                    sheet_name,
                    config.header_row + 1
                ),
            )
        })?;

    debug!(
        sheet = %sheet_name,
        columns = table.columns().len(),
        rows = table.len(),
        "spreadsheet loaded"
    );

    Ok(table)
}

/// Build a table from a calamine range; `None` when no header is found
///
/// Blank lines are skipped, so the header is the first non-blank line at or
/// after `header_row`. Lines above the used range count as blank.
fn parse_range(range: &Range<Data>, header_row: u32) -> Option<Table> {
    let (start_row, start_col) = range.start()?;

    // Cells left of the used range still count as (empty) columns
    let lead = vec![CellValue::Empty; start_col as usize];
    let skip = header_row.saturating_sub(start_row) as usize;
    let mut lines = range
        .rows()
        .skip(skip)
        .map(|cells| {
            lead.iter()
                .cloned()
                .chain(cells.iter().map(parse_cell_value))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.iter().all(CellValue::is_empty));

    let header = lines.next()?;

    // Trailing empty header cells carry no data worth naming
    let width = header
        .iter()
        .rposition(|c| !c.is_empty())
        .map_or(0, |i| i + 1);
    let columns = table::header_names(&header[..width]);

    let rows = lines
        .map(|mut cells| {
            cells.truncate(width);
            cells
        })
        .collect();

    Some(Table::new(columns, rows))
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Date(format_datetime(&value)),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Dates render as `YYYY-MM-DD`; a time part is kept only when present
fn format_datetime(value: &chrono::NaiveDateTime) -> String {
    if value.num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H.%M.%S").to_string()
    }
}
