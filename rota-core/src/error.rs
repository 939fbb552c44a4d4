//! Error types for roster lookups

use crate::grid::CellReference;
use chrono::NaiveDate;
use thiserror::Error;

/// A cell whose formatted value could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read cell {cell} in sheet '{sheet}': {reason}")]
pub struct CellReadError {
    pub sheet: String,
    pub cell: CellReference,
    pub reason: String,
}

impl CellReadError {
    pub fn new(sheet: impl Into<String>, cell: CellReference, reason: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cell,
            reason: reason.into(),
        }
    }
}

/// Why a roster lookup failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// No worksheet is named after the week label of the date
    #[error("no worksheet named '{label}'")]
    WorksheetNotFound { label: String },

    /// The week's worksheet exists but holds no cell marking the date
    #[error("no marker for {date} in sheet '{sheet}'")]
    MarkerNotFound { sheet: String, date: NaiveDate },

    /// A configured strftime pattern cannot render a date
    #[error("invalid {field} '{format}'")]
    InvalidFormat { field: &'static str, format: String },

    /// A cell below the marker could not be read
    #[error(transparent)]
    CellRead(#[from] CellReadError),
}

impl RosterError {
    /// Stable name of the error kind, used in machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            RosterError::WorksheetNotFound { .. } => "worksheet_not_found",
            RosterError::MarkerNotFound { .. } => "marker_not_found",
            RosterError::InvalidFormat { .. } => "invalid_format",
            RosterError::CellRead(_) => "cell_read_error",
        }
    }
}
