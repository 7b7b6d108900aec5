use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::HashSet;

use super::dataset::PlayView;
use crate::types::{AlbumRanking, DailyMinutes, HabitCell, PlayEvent, RankedEntry};
use crate::utils::{format_thousands, group_sum, round_to};

/// The column a ranking groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dimension {
    Artist,
    Album,
    Track,
}

impl Dimension {
    pub fn key(self, event: &PlayEvent) -> Option<&str> {
        match self {
            Dimension::Artist => event.artist_name.as_deref(),
            Dimension::Album => event.album_name.as_deref(),
            Dimension::Track => event.track_name.as_deref(),
        }
    }
}

fn by_minutes(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// The `n` entities with the most minutes, in ascending order so the largest
/// comes last. Ties are ordered by name.
pub fn top_by_minutes(view: &PlayView<'_>, dimension: Dimension, n: usize) -> Vec<RankedEntry> {
    let groups = group_sum(view.iter(), |e| dimension.key(e), |e| e.mins_played);

    // BTreeMap iteration is name-ordered and the sort is stable
    let mut ranked: Vec<(&str, f64)> = groups.into_iter().map(|(name, t)| (name, t.sum)).collect();
    ranked.sort_by(|a, b| by_minutes(a.1, b.1));

    let skip = ranked.len().saturating_sub(n);
    ranked
        .into_iter()
        .skip(skip)
        .map(|(name, minutes)| RankedEntry {
            name: name.to_string(),
            minutes: round_to(minutes, 2),
        })
        .collect()
}

/// The `n` albums with the most minutes, largest first, with their play
/// counts.
pub fn top_albums(view: &PlayView<'_>, n: usize) -> Vec<AlbumRanking> {
    let groups = group_sum(view.iter(), |e| Dimension::Album.key(e), |e| e.mins_played);

    let mut ranked: Vec<_> = groups.into_iter().collect();
    ranked.sort_by(|a, b| by_minutes(b.1.sum, a.1.sum));
    ranked.truncate(n);

    ranked
        .into_iter()
        .map(|(name, total)| AlbumRanking {
            album_name: name.to_string(),
            minutes_played: round_to(total.sum, 2),
            play_count: total.count,
        })
        .collect()
}

/// Minutes per date in chronological order.
pub fn daily_minutes(view: &PlayView<'_>) -> Vec<DailyMinutes> {
    group_sum(view.iter(), |e| Some(e.date), |e| e.mins_played)
        .into_iter()
        .map(|(date, total)| DailyMinutes {
            date,
            minutes: total.sum,
        })
        .collect()
}

/// Minutes per (weekday, hour) pair. Only pairs present in the view appear.
pub fn weekday_hour_matrix(view: &PlayView<'_>) -> Vec<HabitCell> {
    group_sum(view.iter(), |e| Some((e.day_of_week, e.hour_played)), |e| e.mins_played)
        .into_iter()
        .map(|((day, hour), total)| HabitCell {
            day,
            hour,
            minutes: total.sum,
        })
        .collect()
}

/// The four headline numbers shown above every tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_minutes: i64,
    pub average_minutes: f64,
    pub distinct_tracks: usize,
    pub distinct_artists: usize,
}

impl Summary {
    pub fn compute(view: &PlayView<'_>) -> Self {
        let minutes: Vec<f64> = view.iter().map(|e| e.mins_played).collect();

        let total_minutes = minutes.iter().sum::<f64>().round_ties_even() as i64;
        let average_minutes = if minutes.is_empty() {
            0.0
        } else {
            round_to(minutes.iter().mean(), 2)
        };

        let distinct = |dimension: Dimension| {
            view.iter()
                .filter_map(|e| dimension.key(e))
                .collect::<HashSet<_>>()
                .len()
        };

        Self {
            total_minutes,
            average_minutes,
            distinct_tracks: distinct(Dimension::Track),
            distinct_artists: distinct(Dimension::Artist),
        }
    }

    pub fn labels(&self) -> MetricLabels {
        MetricLabels {
            total_minutes: format_thousands(self.total_minutes),
            average_minutes: format!("{:.2}", self.average_minutes),
            total_tracks: format_thousands(self.distinct_tracks as i64),
            total_artists: format_thousands(self.distinct_artists as i64),
        }
    }
}

/// Display strings for the metric cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricLabels {
    pub total_minutes: String,
    pub average_minutes: String,
    pub total_tracks: String,
    pub total_artists: String,
}
