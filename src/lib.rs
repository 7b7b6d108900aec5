//! # Streaming History Dashboard Library
//!
//! `streamstats` turns a cleaned personal music-streaming history into the
//! views of a small analytics dashboard: headline metrics, most-played
//! rankings, a listening timeline, a weekday/hour habits matrix and word
//! clouds over album and track titles.
//!
//! ## Features
//!
//! - Load and year-filter the streaming history CSV
//! - Group, sum and rank plays by artist, album, track, date and hour
//! - Describe charts as serializable values independent of any renderer
//! - Rasterise chart descriptions with plotters
//! - Tab and date-range dispatch without any UI present
//!
//! ## Example
//!
//! ```no_run
//! use streamstats::{Dashboard, DashboardConfig, Dataset, DateSelection, Tab};
//!
//! let config = DashboardConfig::load()?;
//! let dataset = Dataset::load(&config.data_path, &config)?;
//! let dashboard = Dashboard::new(dataset, config);
//!
//! let view = dashboard.render(Tab::TopPlayed, &DateSelection::unfiltered());
//! println!("{}", serde_json::to_string_pretty(&view).unwrap_or_default());
//! # Ok::<(), streamstats::DashboardError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod errors;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{Dataset, Summary};
pub use app::{App as StreamStatsApp, Dashboard, DashboardView};
pub use config::DashboardConfig;
pub use errors::{DashboardError, Result};
pub use plotting::ChartSpec;
pub use types::{DateSelection, PlayEvent, Tab};
