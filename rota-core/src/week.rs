//! Week resolution: which worksheet covers a date

use crate::error::RosterError;
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt::Write;

/// Worksheet label pattern, e.g. "Week starting 8 Feb"
pub const DEFAULT_LABEL_FORMAT: &str = "Week starting %-d %b";

/// Date marker pattern, e.g. "07-Feb-2021"
pub const DEFAULT_MARKER_DATE_FORMAT: &str = "%d-%b-%Y";

/// Monday of the calendar week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(offset))
}

/// Name of the worksheet covering `date`
pub fn week_label(date: NaiveDate) -> String {
    week_start(date).format(DEFAULT_LABEL_FORMAT).to_string()
}

/// Name of the worksheet covering `date`, using a custom strftime pattern
pub fn week_label_with(date: NaiveDate, format: &str) -> Result<String, RosterError> {
    render(week_start(date), format, "label_format")
}

/// Texts that mark `date` inside a week's worksheet
pub fn marker_texts(
    date: NaiveDate,
    date_format: &str,
    match_weekday: bool,
) -> Result<Vec<String>, RosterError> {
    let mut texts = vec![render(date, date_format, "marker_date_format")?];
    if match_weekday {
        texts.push(date.format("%A").to_string());
    }
    Ok(texts)
}

/// Whether `format` is a strftime pattern that can render a plain date
pub fn is_valid_format(format: &str) -> bool {
    NaiveDate::from_ymd_opt(2021, 2, 7)
        .is_some_and(|sample| render(sample, format, "format").is_ok())
}

/// Render `date` with `format`, failing instead of panicking on a bad pattern
fn render(date: NaiveDate, format: &str, field: &'static str) -> Result<String, RosterError> {
    let mut rendered = String::new();
    if format.is_empty() || write!(rendered, "{}", date.format(format)).is_err() {
        return Err(RosterError::InvalidFormat {
            field,
            format: format.to_string(),
        });
    }
    Ok(rendered)
}

/// Recognize `label` as a week label, returning the (month, day) of its Monday.
///
/// Labels carry no year, so every day of a leap year is tried against the pattern.
pub fn parse_week_label(label: &str, format: &str) -> Option<(u32, u32)> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1)?;
    first
        .iter_days()
        .take_while(|d| d.year() == 2024)
        .find(|d| render(*d, format, "label_format").is_ok_and(|l| l == label))
        .map(|d| (d.month(), d.day()))
}
