//! # Configuration
//!
//! Dashboard settings with defaults matching the bundled dataset. A JSON file
//! may override any subset of fields; it is looked up at `$STREAMSTATS_CONFIG`
//! first and then at `<config dir>/streamstats/config.json`.

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::types::DateRange;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STREAMSTATS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Cleaned streaming history CSV
    pub data_path: PathBuf,
    /// Directory holding the intro tab images
    pub assets_dir: PathBuf,
    /// Rows outside `first_year..=last_year` are dropped at load
    pub first_year: i32,
    pub last_year: i32,
    /// Bounds accepted by the date inputs
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Entries kept by the most-played rankings
    pub top_n: usize,
    /// Distinct words rendered per word cloud
    pub max_words: usize,
    /// Largest bubble diameter in the habits chart, in pixels
    pub bubble_size_max: f64,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("spotify_data_clean.csv"),
            assets_dir: PathBuf::from("assets"),
            first_year: 2020,
            last_year: 2024,
            min_date: NaiveDate::from_ymd_opt(2020, 3, 20).unwrap_or_default(),
            max_date: NaiveDate::from_ymd_opt(2024, 12, 30).unwrap_or_default(),
            top_n: 3,
            max_words: 50,
            bubble_size_max: 30.0,
            chart_width: 640,
            chart_height: 480,
        }
    }
}

impl DashboardConfig {
    /// Load the config from the environment-selected or platform file,
    /// falling back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// `<config dir>/streamstats/config.json`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("streamstats").join("config.json"))
    }

    /// The dates the picker accepts.
    pub fn date_bounds(&self) -> DateRange {
        DateRange::new(self.min_date, self.max_date)
    }
}
