//! Output formatters for roster lookups

use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use rota_core::{Roster, RosterError};
use serde::Serialize;
use std::path::Path;

pub type Lookup = (NaiveDate, Result<Roster, RosterError>);

/// Print rosters as plain text, one block per date
pub fn print_human(file_path: &Path, results: &[Lookup], verbose: bool) {
    println!("{}", format!("Roster: {}", file_path.display()).bold());
    println!();

    for (date, result) in results {
        let heading = date.format("%A %d-%b-%Y").to_string();
        match result {
            Ok(roster) => {
                println!(
                    "{} {}",
                    heading.cyan().bold(),
                    format!("({} {})", roster.sheet, roster.marker).bright_black()
                );
                if roster.names.is_empty() {
                    println!("  {}", "nobody scheduled".yellow());
                }
                for name in &roster.names {
                    println!("  {}", name);
                }
            }
            Err(err) => {
                println!("{}", heading.cyan().bold());
                println!("  {} Roster not found for {}", "ERROR".red().bold(), date);
                if verbose {
                    println!("  {}", err.to_string().bright_black());
                }
            }
        }
        println!();
    }
}

#[derive(Serialize)]
struct LookupFailure<'a> {
    date: NaiveDate,
    error: ErrorReport<'a>,
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    kind: &'a str,
    message: String,
}

/// Print rosters as a JSON array
pub fn print_json(results: &[Lookup]) -> Result<()> {
    println!("{}", to_json(results)?);
    Ok(())
}

fn to_json(results: &[Lookup]) -> Result<String> {
    let entries = results
        .iter()
        .map(|(date, result)| match result {
            Ok(roster) => serde_json::to_value(roster),
            Err(err) => serde_json::to_value(LookupFailure {
                date: *date,
                error: ErrorReport {
                    kind: err.kind(),
                    message: err.to_string(),
                },
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(serde_json::to_string_pretty(&entries)?)
}
