use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use rota_core::reader::{self, Workbook};
use rota_core::week::parse_week_label;
use rota_core::{Grid, RosterConfig, RosterLookup};
use std::path::{Path, PathBuf};

mod formatter;
mod logger;

/// Workbook read when neither the command line nor the config names one
const DEFAULT_WORKBOOK: &str = "export.xlsx";

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Look up who is on the duty roster for a date", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the names on duty for a date
    Lookup {
        /// Path to the roster workbook
        #[arg(long, value_name = "FILE")]
        xlsx: Option<PathBuf>,

        /// Date as YYYY-MM-DD; anything not 10 characters long means today
        #[arg(short, long)]
        date: Option<String>,

        /// Number of consecutive days to look up
        #[arg(long, default_value = "1")]
        days: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
    /// List the worksheets of a workbook
    Sheets {
        /// Path to the roster workbook
        #[arg(long, value_name = "FILE")]
        xlsx: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Command::Lookup {
            xlsx,
            date,
            days,
            format,
        } => {
            let date = resolve_date(date.as_deref(), Local::now().date_naive())?;
            let path = workbook_path(xlsx, &config);
            let workbook = open(&path)?;

            let lookup = RosterLookup::with_config(&workbook, config)?;
            let results = lookup.lookup_span(date, days.max(1));

            for (date, result) in &results {
                if let Err(err) = result {
                    log::warn!("Roster date not found: {} ({})", date, err);
                }
            }

            match format {
                OutputFormat::Human => formatter::print_human(&path, &results, cli.verbose > 0),
                OutputFormat::Json => formatter::print_json(&results)?,
            }

            if results.iter().any(|(_, result)| result.is_err()) {
                std::process::exit(1);
            }
        }
        Command::Sheets { xlsx } => {
            let path = workbook_path(xlsx, &config);
            let workbook = open(&path)?;
            print_sheets(&workbook, &config);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RosterConfig> {
    if let Some(config_path) = path {
        return RosterConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from("rota.toml");
    if default_config_path.exists() {
        RosterConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(RosterConfig::default())
    }
}

fn workbook_path(cli_path: Option<PathBuf>, config: &RosterConfig) -> PathBuf {
    cli_path
        .or_else(|| config.workbook.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK))
}

fn open(path: &Path) -> Result<Workbook> {
    reader::read_workbook(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Date to look up: `today` unless the argument is a 10-character ISO date
fn resolve_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match arg {
        Some(d) if d.len() == 10 => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Bad date: {}", d)),
        Some(d) => {
            log::info!("Ignoring date '{}', using {}", d, today);
            Ok(today)
        }
        None => Ok(today),
    }
}

fn print_sheets(workbook: &Workbook, config: &RosterConfig) {
    println!("{}", format!("Workbook: {}", workbook.path.display()).bold());
    for sheet in &workbook.sheets {
        let size = format!("{} x {}", sheet.max_row(), sheet.max_col());
        match parse_week_label(&sheet.name, &config.label_format) {
            Some(_) => println!("  {} {}", sheet.name.cyan(), size.bright_black()),
            None => println!(
                "  {} {} {}",
                sheet.name,
                size.bright_black(),
                "(not a week)".yellow()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("2021-02-07"), today()).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 7).unwrap()
        );
        assert_eq!(resolve_date(None, today()).unwrap(), today());
        assert_eq!(resolve_date(Some("2021-2-7"), today()).unwrap(), today());
        assert_eq!(resolve_date(Some(""), today()).unwrap(), today());
        assert!(resolve_date(Some("2021-13-07"), today()).is_err());
        assert!(resolve_date(Some("07/02/2021"), today()).is_err());
    }

    #[test]
    fn test_workbook_path_precedence() {
        let mut config = RosterConfig::default();
        assert_eq!(workbook_path(None, &config), PathBuf::from("export.xlsx"));

        config.workbook = Some(PathBuf::from("rosters.xlsx"));
        assert_eq!(workbook_path(None, &config), PathBuf::from("rosters.xlsx"));
        assert_eq!(
            workbook_path(Some(PathBuf::from("other.ods")), &config),
            PathBuf::from("other.ods")
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "rota", "-vv", "lookup", "--xlsx", "r.xlsx", "--date", "2021-02-07", "--days", "3",
            "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Lookup { days, date, .. } => {
                assert_eq!(days, 3);
                assert_eq!(date.as_deref(), Some("2021-02-07"));
            }
            Command::Sheets { .. } => panic!("expected lookup"),
        }
    }
}
