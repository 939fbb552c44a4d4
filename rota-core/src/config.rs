//! Configuration for roster lookups

use crate::error::RosterError;
use crate::week::{DEFAULT_LABEL_FORMAT, DEFAULT_MARKER_DATE_FORMAT, is_valid_format};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Lookup configuration, usually read from `rota.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Workbook to read when none is given on the command line
    #[serde(default)]
    pub workbook: Option<PathBuf>,
    /// strftime pattern naming each week's worksheet
    #[serde(default = "default_label_format")]
    pub label_format: String,
    /// strftime pattern of the date marker cell
    #[serde(default = "default_marker_date_format")]
    pub marker_date_format: String,
    /// Also accept the weekday name ("Sunday") as the marker
    #[serde(default = "default_true")]
    pub match_weekday: bool,
}

fn default_label_format() -> String {
    DEFAULT_LABEL_FORMAT.to_string()
}

fn default_marker_date_format() -> String {
    DEFAULT_MARKER_DATE_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

impl RosterConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RosterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check that both patterns can render a date
    pub fn validate(&self) -> Result<(), RosterError> {
        if !is_valid_format(&self.label_format) {
            return Err(RosterError::InvalidFormat {
                field: "label_format",
                format: self.label_format.clone(),
            });
        }
        if !is_valid_format(&self.marker_date_format) {
            return Err(RosterError::InvalidFormat {
                field: "marker_date_format",
                format: self.marker_date_format.clone(),
            });
        }
        Ok(())
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            workbook: None,
            label_format: default_label_format(),
            marker_date_format: default_marker_date_format(),
            match_weekday: true,
        }
    }
}
