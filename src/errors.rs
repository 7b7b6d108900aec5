//! # Errors
//!
//! A single error type covers dataset ingestion, input validation and the
//! word-frequency failure surfaced by the words tab.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {date} is outside the allowed range {min} to {max}")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("Start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown day of week `{0}`")]
    UnknownDay(String),

    #[error("Unknown hour label `{0}`")]
    UnknownHour(String),

    #[error("Unknown tab `{0}`")]
    UnknownTab(String),

    #[error("We need at least 1 word to plot a word cloud, got {found}.")]
    InsufficientWords { found: usize },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
