//! Tabular data structures

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Date already rendered for use in a filename
    Date(String),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty (blank text counts as empty)
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::Date(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => {
                // 42.0 reads as 42 in a filename
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) | CellValue::Date(s) => write!(f, "{}", s.trim()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// A spreadsheet loaded as named columns and ordered rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table; short rows are padded with empty cells
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names in sheet order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by its 0-based data index
    pub fn row(&self, index: usize) -> Option<SpreadsheetRow<'_>> {
        self.rows.get(index).map(|values| SpreadsheetRow {
            index,
            columns: &self.columns,
            values,
        })
    }

    /// Iterate rows in file order
    pub fn rows(&self) -> impl Iterator<Item = SpreadsheetRow<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, values)| SpreadsheetRow {
                index,
                columns: &self.columns,
                values,
            })
    }

    /// Names from `names` that are not columns of this table
    pub fn missing_columns<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !self.columns.iter().any(|c| c == n))
            .map(str::to_string)
            .collect()
    }

    /// Re-project to the given columns, in the given order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let missing = self.missing_columns(names);
        if !missing.is_empty() {
            return Err(Error::UnknownColumns(missing));
        }

        let positions: Vec<usize> = names
            .iter()
            .filter_map(|n| self.columns.iter().position(|c| c == n.as_ref()))
            .collect();

        let columns = positions.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table { columns, rows })
    }
}

/// One data row viewed as an ordered column → value mapping
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetRow<'a> {
    index: usize,
    columns: &'a [String],
    values: &'a [CellValue],
}

impl<'a> SpreadsheetRow<'a> {
    /// 0-based data index of this row
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the value of a column
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Iterate (column, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Turn raw header cells into unique, non-empty column names
pub(crate) fn header_names(cells: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(cells.len());

    for (i, cell) in cells.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Column {}", i + 1)
        } else {
            cell.to_string()
        };

        let name = match seen.get_mut(&base) {
            Some(count) => {
                let mut candidate = format!("{}.{}", base, count);
                while names.contains(&candidate) {
                    *count += 1;
                    candidate = format!("{}.{}", base, count);
                }
                *count += 1;
                candidate
            }
            None => base.clone(),
        };

        seen.entry(base).or_insert(1);
        names.push(name);
    }

    names
}
