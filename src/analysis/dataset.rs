use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::errors::{DashboardError, Result};
use crate::types::{DateRange, DayOfWeek, HourOfDay, PlayEvent};

/// A row as it appears in the cleaned CSV export. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawPlayRow {
    date: String,
    year: i32,
    artist_name: Option<String>,
    album_name: Option<String>,
    track_name: Option<String>,
    mins_played: f64,
    day_of_week: String,
    hour_played: String,
}

impl RawPlayRow {
    fn into_event(self, row: usize) -> Result<PlayEvent> {
        let invalid = |reason: String| DashboardError::InvalidRow { row, reason };

        let date = parse_date(&self.date).ok_or_else(|| invalid(format!("bad date `{}`", self.date)))?;
        let day_of_week: DayOfWeek = self
            .day_of_week
            .parse()
            .map_err(|e: DashboardError| invalid(e.to_string()))?;
        let hour_played: HourOfDay = self
            .hour_played
            .parse()
            .map_err(|e: DashboardError| invalid(e.to_string()))?;

        Ok(PlayEvent {
            date,
            artist_name: self.artist_name,
            album_name: self.album_name,
            track_name: self.track_name,
            mins_played: self.mins_played,
            day_of_week,
            hour_played,
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// The loaded streaming history. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<PlayEvent>,
}

impl Dataset {
    pub fn from_events(events: Vec<PlayEvent>) -> Self {
        Self { events }
    }

    /// Load the CSV at `path`, keeping rows within the configured years.
    pub fn load(path: &Path, config: &DashboardConfig) -> Result<Self> {
        info!("Loading streaming history from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config.first_year..=config.last_year)
    }

    /// Parse CSV from any reader. Rows whose `year` falls outside `years`
    /// are dropped, as are rows with negative minutes.
    pub fn from_reader<R: Read>(reader: R, years: RangeInclusive<i32>) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut events = Vec::new();
        let mut outside_years = 0usize;

        for (idx, result) in reader.deserialize::<RawPlayRow>().enumerate() {
            // header is line 1
            let row = idx + 2;
            let raw = result?;

            if !years.contains(&raw.year) {
                outside_years += 1;
                continue;
            }
            if raw.mins_played < 0.0 || raw.mins_played.is_nan() {
                warn!("Skipping row {}: invalid minutes played {}", row, raw.mins_played);
                continue;
            }

            events.push(raw.into_event(row)?);
        }

        info!(
            "Loaded {} play events ({} rows outside {}..={})",
            events.len(),
            outside_years,
            years.start(),
            years.end()
        );

        Ok(Self { events })
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Derive the view for one render cycle. `None` means the whole dataset.
    pub fn filter(&self, range: Option<DateRange>) -> PlayView<'_> {
        let rows = match range {
            Some(range) => self.events.iter().filter(|e| range.contains(e.date)).collect(),
            None => self.events.iter().collect(),
        };
        PlayView { rows }
    }
}

/// A borrowed, filtered slice of the dataset.
#[derive(Debug, Clone)]
pub struct PlayView<'a> {
    rows: Vec<&'a PlayEvent>,
}

impl<'a> PlayView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a PlayEvent> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
