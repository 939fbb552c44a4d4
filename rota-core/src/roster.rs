//! Roster extraction: find the marker cell, then read the names beneath it

use crate::config::RosterConfig;
use crate::error::{CellReadError, RosterError};
use crate::grid::{CellReference, Grid};
use crate::week::marker_texts;
use chrono::NaiveDate;
use serde::Serialize;

/// Names scheduled for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub date: NaiveDate,
    pub week_label: String,
    pub sheet: String,
    pub marker: CellReference,
    pub names: Vec<String>,
}

/// First cell, in row-major order, that holds `date` as a date value or
/// whose text equals one of `texts`
pub fn find_marker<G: Grid + ?Sized>(
    grid: &G,
    date: NaiveDate,
    texts: &[String],
) -> Option<CellReference> {
    for row in 0..grid.max_row() {
        for col in 0..grid.max_col() {
            if grid.date_value(row, col) == Some(date) {
                return Some(CellReference::new(row, col));
            }
            match grid.formatted_value(row, col) {
                Ok(value) => {
                    if texts.iter().any(|t| *t == value) {
                        return Some(CellReference::new(row, col));
                    }
                }
                Err(e) => log::warn!("Skipping unreadable cell while searching: {}", e),
            }
        }
    }
    None
}

/// Non-empty values in the marker's column, from the row below it to the end of the sheet.
///
/// Blank cells are skipped, not treated as the end of the list.
pub fn collect_names<G: Grid + ?Sized>(
    grid: &G,
    marker: CellReference,
) -> Result<Vec<String>, CellReadError> {
    let mut names = Vec::new();
    for row in (marker.row + 1)..grid.max_row() {
        let value = grid.formatted_value(row, marker.col)?;
        if !value.is_empty() {
            names.push(value);
        }
    }
    Ok(names)
}

/// Locate the marker for `date` in `grid` and harvest the names below it
pub fn extract_roster<G: Grid + ?Sized>(
    grid: &G,
    date: NaiveDate,
    config: &RosterConfig,
) -> Result<(CellReference, Vec<String>), RosterError> {
    let texts = marker_texts(date, &config.marker_date_format, config.match_weekday)?;

    let marker = find_marker(grid, date, &texts).ok_or_else(|| RosterError::MarkerNotFound {
        sheet: grid.name().to_string(),
        date,
    })?;
    log::debug!("Marker for {} at {} in '{}'", date, marker, grid.name());

    let names = collect_names(grid, marker)?;
    Ok((marker, names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{CellValue, Sheet};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn week_sheet() -> Sheet {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.set_text(0, 0, "Duty roster");
        sheet.set_text(2, 0, "Saturday");
        sheet.set_text(2, 1, "Sunday");
        sheet.set_text(3, 0, "Alice");
        for (i, name) in ["Michael", "Brian", "Elsie", "Ernest"].iter().enumerate() {
            sheet.set_text(3 + i as u32, 1, *name);
        }
        sheet
    }

    #[test]
    fn test_find_marker_by_weekday() {
        let sheet = week_sheet();
        assert_eq!(
            find_marker(&sheet, date(2021, 2, 7), &texts(&["07-Feb-2021", "Sunday"])),
            Some(CellReference::new(2, 1))
        );
    }

    #[test]
    fn test_find_marker_first_in_row_major_order() {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.set_text(4, 0, "Sunday");
        sheet.set_text(1, 3, "07-Feb-2021");
        sheet.set_text(1, 5, "Sunday");

        assert_eq!(
            find_marker(&sheet, date(2021, 2, 7), &texts(&["07-Feb-2021", "Sunday"])),
            Some(CellReference::new(1, 3))
        );
    }

    #[test]
    fn test_find_marker_at_origin() {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.set_text(0, 0, "Sunday");
        sheet.set_text(1, 0, "Michael");

        assert_eq!(
            find_marker(&sheet, date(2021, 2, 7), &texts(&["Sunday"])),
            Some(CellReference::new(0, 0))
        );
    }

    #[test]
    fn test_find_marker_skips_unreadable_cells() {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.insert(0, 0, CellValue::Error("#DIV/0!".to_string()));
        sheet.set_text(1, 1, "Sunday");

        assert_eq!(
            find_marker(&sheet, date(2021, 2, 7), &texts(&["Sunday"])),
            Some(CellReference::new(1, 1))
        );
    }

    #[test]
    fn test_find_marker_is_exact() {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.set_text(0, 0, "sunday");
        sheet.set_text(0, 1, " Sunday");
        sheet.set_text(0, 2, "7-Feb-2021");

        assert_eq!(find_marker(&sheet, date(2021, 2, 7), &texts(&["07-Feb-2021", "Sunday"])), None);
    }

    #[test]
    fn test_find_marker_by_date_value() {
        let mut sheet = Sheet::new("Week starting 8 Feb");
        sheet.set_text(0, 0, "Roster");
        sheet.insert(1, 1, CellValue::Date(date(2021, 2, 9).and_hms_opt(0, 0, 0).unwrap()));

        // a date cell matches whatever text pattern is configured
        assert_eq!(
            find_marker(&sheet, date(2021, 2, 9), &texts(&["2021/02/09"])),
            Some(CellReference::new(1, 1))
        );
        assert_eq!(find_marker(&sheet, date(2021, 2, 10), &texts(&["Wednesday"])), None);
    }

    #[test]
    fn test_collect_names_skips_blanks() {
        let mut sheet = week_sheet();
        // row 7 left blank, another name further down
        sheet.set_text(8, 1, "Ada");
        sheet.set_text(8, 2, "not in column");

        let names = collect_names(&sheet, CellReference::new(2, 1)).unwrap();
        assert_eq!(names, vec!["Michael", "Brian", "Elsie", "Ernest", "Ada"]);
    }

    #[test]
    fn test_collect_names_below_last_row() {
        let sheet = week_sheet();
        let names = collect_names(&sheet, CellReference::new(6, 1)).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_collect_names_read_failure_aborts() {
        let mut sheet = week_sheet();
        sheet.insert(5, 1, CellValue::Error("#N/A".to_string()));

        let err = collect_names(&sheet, CellReference::new(2, 1)).unwrap_err();
        assert_eq!(err.cell, CellReference::new(5, 1));
        assert_eq!(err.reason, "#N/A");
    }

    #[test]
    fn test_collect_names_formats_values() {
        let mut sheet = Sheet::new("Week starting 1 Feb");
        sheet.set_text(0, 0, "Sunday");
        sheet.insert(1, 0, CellValue::Number(101.0));
        sheet.insert(2, 0, CellValue::Boolean(false));

        let names = collect_names(&sheet, CellReference::new(0, 0)).unwrap();
        assert_eq!(names, vec!["101", "FALSE"]);
    }

    #[test]
    fn test_extract_roster() {
        let sheet = week_sheet();
        let (marker, names) =
            extract_roster(&sheet, date(2021, 2, 7), &RosterConfig::default()).unwrap();

        assert_eq!(marker, CellReference::new(2, 1));
        assert_eq!(names, vec!["Michael", "Brian", "Elsie", "Ernest"]);
    }

    #[test]
    fn test_extract_roster_by_date_marker() {
        let mut sheet = Sheet::new("Week starting 8 Feb");
        sheet.set_text(0, 2, "09-Feb-2021");
        sheet.set_text(1, 2, "Grace");

        let (marker, names) =
            extract_roster(&sheet, date(2021, 2, 9), &RosterConfig::default()).unwrap();
        assert_eq!(marker, CellReference::new(0, 2));
        assert_eq!(names, vec!["Grace"]);
    }

    #[test]
    fn test_extract_roster_without_weekday_matching() {
        let sheet = week_sheet();
        let config = RosterConfig {
            match_weekday: false,
            ..RosterConfig::default()
        };

        let err = extract_roster(&sheet, date(2021, 2, 7), &config).unwrap_err();
        assert_eq!(
            err,
            RosterError::MarkerNotFound {
                sheet: "Week starting 1 Feb".to_string(),
                date: date(2021, 2, 7),
            }
        );
    }

    #[test]
    fn test_extract_roster_custom_pattern_with_date_cell() {
        let mut sheet = Sheet::new("Week starting 8 Feb");
        sheet.insert(0, 0, CellValue::Date(date(2021, 2, 9).and_hms_opt(0, 0, 0).unwrap()));
        sheet.set_text(1, 0, "Grace");

        let config = RosterConfig {
            marker_date_format: "%Y-%m-%d".to_string(),
            match_weekday: false,
            ..RosterConfig::default()
        };
        assert!(config.validate().is_ok());

        let (marker, names) = extract_roster(&sheet, date(2021, 2, 9), &config).unwrap();
        assert_eq!(marker, CellReference::new(0, 0));
        assert_eq!(names, vec!["Grace"]);
    }

    #[test]
    fn test_extract_roster_bad_pattern_is_error() {
        let sheet = week_sheet();
        let config = RosterConfig {
            marker_date_format: "%d %Q".to_string(),
            ..RosterConfig::default()
        };

        let err = extract_roster(&sheet, date(2021, 2, 7), &config).unwrap_err();
        assert_eq!(err.kind(), "invalid_format");
    }

    #[test]
    fn test_extract_roster_marker_not_found() {
        let sheet = week_sheet();
        // Tuesday appears nowhere in the sheet
        let err = extract_roster(&sheet, date(2021, 2, 2), &RosterConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "marker_not_found");
    }
}
