//! Workbook data structures

use crate::error::CellReadError;
use crate::grid::{CellReference, Grid, WorkbookSource};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::path::PathBuf;

/// Represents a complete workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

impl WorkbookSource for Workbook {
    type Sheet = Sheet;

    fn worksheets(&self) -> &[Sheet] {
        &self.sheets
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub cells: HashMap<(u32, u32), Cell>,
    pub used_range: Option<(u32, u32)>, // (rows, cols)
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
            used_range: None,
        }
    }

    /// Get a cell at the given position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Store a cell, growing the used range to cover it
    pub fn insert(&mut self, row: u32, col: u32, value: CellValue) {
        let (rows, cols) = self.used_range.unwrap_or((0, 0));
        self.used_range = Some((rows.max(row + 1), cols.max(col + 1)));
        self.cells.insert((row, col), Cell { row, col, value });
    }

    /// Store a text cell
    pub fn set_text(&mut self, row: u32, col: u32, text: impl Into<String>) {
        self.insert(row, col, CellValue::Text(text.into()));
    }
}

impl Grid for Sheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_row(&self) -> u32 {
        self.used_range.map(|(rows, _)| rows).unwrap_or(0)
    }

    fn max_col(&self) -> u32 {
        self.used_range.map(|(_, cols)| cols).unwrap_or(0)
    }

    fn formatted_value(&self, row: u32, col: u32) -> Result<String, CellReadError> {
        match self.get_cell(row, col) {
            Some(cell) => cell.value.formatted().map_err(|reason| {
                CellReadError::new(&self.name, CellReference::new(row, col), reason)
            }),
            None => Ok(String::new()),
        }
    }

    fn date_value(&self, row: u32, col: u32) -> Option<NaiveDate> {
        match self.get_cell(row, col).map(|cell| &cell.value) {
            Some(CellValue::Date(dt)) => Some(dt.date()),
            _ => None,
        }
    }
}

/// Represents a single cell
#[derive(Debug, Clone)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
    /// Elapsed time in days
    Duration(f64),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Text shown for this value, or the error that prevents showing it
    pub fn formatted(&self) -> Result<String, String> {
        match self {
            CellValue::Empty => Ok(String::new()),
            CellValue::Text(s) => Ok(s.clone()),
            CellValue::Number(n) => Ok(format_number(*n)),
            CellValue::Boolean(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::Date(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    Ok(dt.format("%d-%b-%Y").to_string())
                } else {
                    Ok(dt.format("%d-%b-%Y %H:%M:%S").to_string())
                }
            }
            CellValue::Duration(d) => Ok(format_number(*d)),
            CellValue::Error(e) => Err(e.clone()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
