//! Read-only grid access used by the roster extractor

use crate::error::CellReadError;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

/// Cell reference (e.g., A1, B2), 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellReference {
    pub row: u32,
    pub col: u32,
}

impl CellReference {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel-style reference (e.g., "A1")
    pub fn to_excel_ref(&self) -> String {
        format!("{}{}", Self::col_to_letter(self.col), self.row + 1)
    }

    /// Convert column number to letter (0 -> A, 1 -> B, etc.)
    fn col_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            result.insert(0, (b'A' + (col % 26) as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

impl PartialOrd for CellReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order, the order the marker search visits cells in
impl Ord for CellReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl std::fmt::Display for CellReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_excel_ref())
    }
}

impl Serialize for CellReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A worksheet as the extractor sees it
pub trait Grid {
    fn name(&self) -> &str;

    /// Number of rows in the used range, counted from row 0
    fn max_row(&self) -> u32;

    /// Number of columns in the used range, counted from column 0
    fn max_col(&self) -> u32;

    /// Displayed text of the cell; empty for cells that hold nothing
    fn formatted_value(&self, row: u32, col: u32) -> Result<String, CellReadError>;

    /// Calendar date held by the cell, when it stores a date value rather than text
    fn date_value(&self, _row: u32, _col: u32) -> Option<NaiveDate> {
        None
    }
}

/// A workbook as the lookup sees it
pub trait WorkbookSource {
    type Sheet: Grid;

    fn worksheets(&self) -> &[Self::Sheet];

    /// Worksheet whose name equals `name` exactly
    fn find_sheet(&self, name: &str) -> Option<&Self::Sheet> {
        self.worksheets().iter().find(|s| s.name() == name)
    }
}
