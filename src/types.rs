//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing play events, calendar dimensions, date filters and the
//! aggregated tables produced by the analysis layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DashboardError, Result};

/// One recorded streaming session.
///
/// Names are optional because the source file contains gaps; a missing name is
/// skipped by every grouping and distinct count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayEvent {
    /// Calendar date the track was played
    pub date: NaiveDate,
    /// Name of the artist
    pub artist_name: Option<String>,
    /// Name of the album
    pub album_name: Option<String>,
    /// Name of the track
    pub track_name: Option<String>,
    /// Minutes played, never negative
    pub mins_played: f64,
    /// Day of week the session started on
    pub day_of_week: DayOfWeek,
    /// Hour of day the session started in
    pub hour_played: HourOfDay,
}

/// Day of the week, ordered Sunday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All days in display order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Position in the Sunday-first ordering.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayOfWeek {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DashboardError::UnknownDay(s.to_string()))
    }
}

/// Hour of the day in 0..=23, labelled the 12-hour way ("12 am" .. "11 pm").
///
/// Serialized as its label so it lines up with chart categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HourOfDay(u8);

impl HourOfDay {
    /// Build an hour from a 24-hour clock value. Returns `None` past 23.
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// Every hour in display order, midnight first.
    pub fn all() -> impl Iterator<Item = HourOfDay> {
        (0..24).map(HourOfDay)
    }

    pub fn label(self) -> String {
        let suffix = if self.0 < 12 { "am" } else { "pm" };
        let twelve_hour = match self.0 % 12 {
            0 => 12,
            h => h,
        };
        format!("{} {}", twelve_hour, suffix)
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<HourOfDay> for String {
    fn from(hour: HourOfDay) -> Self {
        hour.label()
    }
}

impl TryFrom<String> for HourOfDay {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for HourOfDay {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || DashboardError::UnknownHour(s.to_string());
        let mut parts = s.split_whitespace();
        let (Some(number), Some(suffix), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(unknown());
        };

        let number: u8 = number.parse().map_err(|_| unknown())?;
        if !(1..=12).contains(&number) {
            return Err(unknown());
        }

        let base = number % 12;
        let hour = match suffix.to_ascii_lowercase().as_str() {
            "am" => base,
            "pm" => base + 12,
            _ => return Err(unknown()),
        };
        Ok(HourOfDay(hour))
    }
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The two sides of the date picker. Either side may be cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    /// No filter: the full dataset is used.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Parse the raw picker values, rejecting anything the picker itself
    /// would not allow. Blank strings clear that side.
    pub fn parse(start: &str, end: &str, bounds: DateRange) -> Result<Self> {
        let start = parse_bounded_date(start, bounds)?;
        let end = parse_bounded_date(end, bounds)?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(DashboardError::InvertedRange { start, end });
            }
        }

        Ok(Self { start, end })
    }

    /// The filter to apply. Only active when both bounds are present.
    pub fn range(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }
}

fn parse_bounded_date(value: &str, bounds: DateRange) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidDate(value.to_string()))?;

    if !bounds.contains(date) {
        return Err(DashboardError::DateOutOfRange {
            date,
            min: bounds.start,
            max: bounds.end,
        });
    }

    Ok(Some(date))
}

/// The five dashboard tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Intro,
    TopPlayed,
    Timeline,
    Habits,
    Words,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Intro, Tab::TopPlayed, Tab::Timeline, Tab::Habits, Tab::Words];

    /// Stable identifier used by the tab selector.
    pub fn id(self) -> &'static str {
        match self {
            Tab::Intro => "tab-1",
            Tab::TopPlayed => "tab-2",
            Tab::Timeline => "tab-3",
            Tab::Habits => "tab-4",
            Tab::Words => "tab-5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Intro => "My Intro",
            Tab::TopPlayed => "My Most-Played Hits: Artists, Albums, and Tracks",
            Tab::Timeline => "My Music Listening Timeline",
            Tab::Habits => "My Music Habits: Weekday and Hours",
            Tab::Words => "Words that Define My Listening Habits",
        }
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| DashboardError::UnknownTab(s.to_string()))
    }
}

/// An entity and its summed minutes, as shown in a ranked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub minutes: f64,
}

/// An album with its summed minutes and number of plays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumRanking {
    pub album_name: String,
    #[serde(rename = "Minutes Played")]
    pub minutes_played: f64,
    #[serde(rename = "Counts Albums Played")]
    pub play_count: usize,
}

/// Minutes played on a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub minutes: f64,
}

/// Minutes played in one (weekday, hour) bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitCell {
    pub day: DayOfWeek,
    pub hour: HourOfDay,
    pub minutes: f64,
}

/// Word and its occurrence count in a normalized title blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}
