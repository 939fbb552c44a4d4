//! rota-core: duty roster lookup over weekly spreadsheet workbooks
//!
//! A workbook holds one worksheet per week, named after the Monday that
//! starts it. Within the week's worksheet, the cell holding the date (or its
//! weekday name) marks the column whose cells below it list the people on
//! duty that day.

pub mod config;
pub mod error;
pub mod grid;
pub mod reader;
pub mod roster;
pub mod week;

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;

pub use config::RosterConfig;
pub use error::{CellReadError, RosterError};
pub use grid::{CellReference, Grid, WorkbookSource};
pub use roster::Roster;

/// Main lookup interface over a loaded workbook
pub struct RosterLookup<'a, W: WorkbookSource> {
    workbook: &'a W,
    config: RosterConfig,
}

impl<'a, W: WorkbookSource> RosterLookup<'a, W> {
    /// Create a lookup with default configuration
    pub fn new(workbook: &'a W) -> Self {
        Self {
            workbook,
            config: RosterConfig::default(),
        }
    }

    /// Create a lookup with custom configuration, rejecting patterns that
    /// cannot render a date
    pub fn with_config(workbook: &'a W, config: RosterConfig) -> Result<Self, RosterError> {
        config.validate()?;
        Ok(Self { workbook, config })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Roster for `date`
    pub fn lookup(&self, date: NaiveDate) -> Result<Roster, RosterError> {
        let label = week::week_label_with(date, &self.config.label_format)?;

        let sheet = self
            .workbook
            .find_sheet(&label)
            .ok_or_else(|| RosterError::WorksheetNotFound {
                label: label.clone(),
            })?;
        log::debug!("Found sheet: {}", label);

        let (marker, names) = roster::extract_roster(sheet, date, &self.config)?;

        Ok(Roster {
            date,
            week_label: label,
            sheet: sheet.name().to_string(),
            marker,
            names,
        })
    }

    /// Only the names scheduled for `date`
    pub fn names(&self, date: NaiveDate) -> Result<Vec<String>, RosterError> {
        self.lookup(date).map(|roster| roster.names)
    }
}

impl<W> RosterLookup<'_, W>
where
    W: WorkbookSource + Sync,
{
    /// Rosters for `days` consecutive dates starting at `start`, in date order.
    ///
    /// Each date is an independent lookup; they run in parallel over the
    /// shared workbook. The span stops early at the last representable date.
    pub fn lookup_span(
        &self,
        start: NaiveDate,
        days: u32,
    ) -> Vec<(NaiveDate, Result<Roster, RosterError>)> {
        let dates: Vec<NaiveDate> = (0..days)
            .map_while(|offset| start.checked_add_signed(Duration::days(i64::from(offset))))
            .collect();
        if dates.len() < days as usize {
            log::warn!(
                "Span from {} cut to {} of {} days: calendar ends at {}",
                start,
                dates.len(),
                days,
                NaiveDate::MAX
            );
        }

        dates
            .into_par_iter()
            .map(|date| (date, self.lookup(date)))
            .collect()
    }
}
