//! Excel/ODS file reader using calamine

use anyhow::{Context, Result};
use calamine::{Data, DataType, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;

pub mod workbook;

pub use workbook::{Cell, CellValue, Sheet, Workbook};

/// Read a workbook from a file path
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut excel: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = excel
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read worksheet: {}", sheet_name))?;
        sheets.push(parse_sheet(sheet_name, &range));
    }

    if sheets.is_empty() {
        anyhow::bail!("No worksheets found in {}", path.display());
    }

    log::info!("Opened {} ({} worksheets)", path.display(), sheets.len());

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // used_cells() is relative to the range start, which need not be A1
    let (start_row, start_col) = match range.start() {
        Some(start) => start,
        None => return sheet,
    };

    for (rel_row, rel_col, data) in range.used_cells() {
        let value = parse_cell_value(data);
        if value.is_empty() {
            continue;
        }
        sheet.insert(start_row + rel_row as u32, start_col + rel_col as u32, value);
    }

    // Trailing blank rows still count toward the used range
    if let Some((end_row, end_col)) = range.end() {
        let (rows, cols) = sheet.used_range.unwrap_or((0, 0));
        sheet.used_range = Some((rows.max(end_row + 1), cols.max(end_col + 1)));
    }

    sheet
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Duration(dt.as_f64())
            } else if let Some(ndt) = dt.as_datetime() {
                CellValue::Date(ndt)
            } else {
                CellValue::Number(dt.as_f64())
            }
        }
        Data::DateTimeIso(s) => match data.as_datetime() {
            Some(ndt) => CellValue::Date(ndt),
            None => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
