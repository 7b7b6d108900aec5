//! Tab and date-range dispatch.
//!
//! [`Dashboard`] owns the loaded dataset and configuration and turns a
//! `(tab, date selection)` pair into a [`DashboardView`]. It has no UI
//! dependency, so every render cycle can be exercised directly.

use log::{debug, warn};
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::{
    daily_minutes, normalize_titles, top_albums, top_by_minutes, weekday_hour_matrix, Dataset,
    Dimension, MetricLabels, PlayView, Summary,
};
use crate::config::DashboardConfig;
use crate::errors::Result;
use crate::plotting::{album_sunburst, habits_bubble, minutes_area, ranked_bar, word_cloud, ChartSpec};
use crate::types::{DateSelection, PlayEvent, Tab};

pub const INTRO_HEADING: &str = "Welcome to My Spotify Journey";

pub const INTRO_TEXT: &str = "Uncover the trends and insights within my Spotify listening data. \
To begin, choose a date range using the calendar. This will filter my Spotify dataset and update \
the metrics and visualizations in the tabs. View the most played artists and albums in \
user-friendly charts. Track the trend of total minutes played over time. Analyze the frequency of \
my Spotify playback by day and hour in a scatter plot. Discover the most common words in my album \
and song titles through interactive word clouds.";

const INTRO_IMAGES: [&str; 2] = ["image_spotify_covers.jpg", "image_spotify_covers_2.jpg"];

/// Static content of the intro tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroContent {
    pub heading: String,
    pub text: String,
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelBody {
    Chart(ChartSpec),
    /// The panel could not be built; siblings are unaffected
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

impl Panel {
    fn chart(title: &str, spec: ChartSpec) -> Self {
        Self {
            title: title.to_string(),
            body: PanelBody::Chart(spec),
        }
    }

    fn from_result(title: &str, spec: Result<ChartSpec>) -> Self {
        let body = match spec {
            Ok(spec) => PanelBody::Chart(spec),
            Err(e) => {
                warn!("Panel '{}' failed: {}", title, e);
                PanelBody::Failed {
                    message: e.to_string(),
                }
            }
        };
        Self {
            title: title.to_string(),
            body,
        }
    }

    pub fn chart_spec(&self) -> Option<&ChartSpec> {
        match &self.body {
            PanelBody::Chart(spec) => Some(spec),
            PanelBody::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabContent {
    Intro(IntroContent),
    Panels { panels: Vec<Panel> },
}

/// Everything the shell needs to draw one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub tab: Tab,
    pub selection: DateSelection,
    pub summary: Summary,
    pub metrics: MetricLabels,
    pub content: TabContent,
}

/// Immutable dashboard context: the loaded plays plus the settings that
/// shape every view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Recompute the metrics for the selection, then build only the active
    /// tab's content.
    pub fn render(&self, tab: Tab, selection: &DateSelection) -> DashboardView {
        let view = self.dataset.filter(selection.range());
        debug!(
            "Rendering {} with {} of {} plays",
            tab.id(),
            view.len(),
            self.dataset.len()
        );

        let summary = Summary::compute(&view);
        let metrics = summary.labels();
        let content = match tab {
            Tab::Intro => TabContent::Intro(self.intro()),
            Tab::TopPlayed => TabContent::Panels {
                panels: self.top_played(&view),
            },
            Tab::Timeline => TabContent::Panels {
                panels: vec![Panel::chart(
                    "Trend of Total Minutes Played",
                    minutes_area(&daily_minutes(&view)),
                )],
            },
            Tab::Habits => TabContent::Panels {
                panels: vec![Panel::chart(
                    "Frequency of Music Played by Weekday and Hour",
                    habits_bubble(&weekday_hour_matrix(&view), self.config.bubble_size_max),
                )],
            },
            Tab::Words => TabContent::Panels {
                panels: self.words(&view),
            },
        };

        DashboardView {
            tab,
            selection: *selection,
            summary,
            metrics,
            content,
        }
    }

    fn intro(&self) -> IntroContent {
        IntroContent {
            heading: INTRO_HEADING.to_string(),
            text: INTRO_TEXT.to_string(),
            images: INTRO_IMAGES
                .iter()
                .map(|name| self.config.assets_dir.join(name))
                .collect(),
        }
    }

    fn top_played(&self, view: &PlayView<'_>) -> Vec<Panel> {
        let n = self.config.top_n;
        vec![
            Panel::chart(
                "Artist Most Played",
                ranked_bar(&top_by_minutes(view, Dimension::Artist, n)),
            ),
            Panel::chart("Album Most Played", album_sunburst(&top_albums(view, n))),
            Panel::chart(
                "Track Most Played",
                ranked_bar(&top_by_minutes(view, Dimension::Track, n)),
            ),
        ]
    }

    fn words(&self, view: &PlayView<'_>) -> Vec<Panel> {
        let title_cloud = |field: fn(&PlayEvent) -> Option<&str>| {
            let blob = normalize_titles(view.iter().map(field));
            word_cloud(&blob, self.config.max_words)
        };

        vec![
            Panel::from_result("Album title Words", title_cloud(|e| e.album_name.as_deref())),
            Panel::from_result("Track title Words", title_cloud(|e| e.track_name.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DayOfWeek, HourOfDay};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(day: &str, artist: &str, album: Option<&str>, track: &str, mins: f64) -> PlayEvent {
        PlayEvent {
            date: date(day),
            artist_name: Some(artist.to_string()),
            album_name: album.map(str::to_string),
            track_name: Some(track.to_string()),
            mins_played: mins,
            day_of_week: DayOfWeek::Friday,
            hour_played: HourOfDay::new(9).unwrap(),
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(
            Dataset::from_events(vec![
                event("2021-01-01", "A", Some("Alpha"), "Song1", 5.0),
                event("2021-01-01", "A", Some("Alpha"), "Song2", 3.0),
                event("2021-02-01", "B", Some("Beta"), "Song3", 10.0),
            ]),
            DashboardConfig::default(),
        )
    }

    fn january() -> DateSelection {
        DateSelection::between(date("2021-01-01"), date("2021-01-31"))
    }

    fn panels(view: &DashboardView) -> &[Panel] {
        match &view.content {
            TabContent::Panels { panels } => panels,
            TabContent::Intro(_) => panic!("expected panels for {:?}", view.tab),
        }
    }

    #[test]
    fn test_metrics_follow_selection_on_every_tab() {
        let dashboard = dashboard();
        for tab in Tab::ALL {
            let view = dashboard.render(tab, &january());
            assert_eq!(view.metrics.total_minutes, "8");
            assert_eq!(view.metrics.average_minutes, "4.00");
            assert_eq!(view.metrics.total_tracks, "2");
            assert_eq!(view.metrics.total_artists, "1");
        }
    }

    #[test]
    fn test_half_open_selection_is_unfiltered() {
        let dashboard = dashboard();
        let selection = DateSelection {
            start: Some(date("2021-01-01")),
            end: None,
        };
        let view = dashboard.render(Tab::Intro, &selection);
        assert_eq!(view.summary.total_minutes, 18);
    }

    #[test]
    fn test_intro_has_static_content() {
        let view = dashboard().render(Tab::Intro, &DateSelection::unfiltered());
        let TabContent::Intro(intro) = view.content else {
            panic!("expected intro content");
        };
        assert_eq!(intro.heading, INTRO_HEADING);
        assert_eq!(
            intro.images,
            vec![
                PathBuf::from("assets/image_spotify_covers.jpg"),
                PathBuf::from("assets/image_spotify_covers_2.jpg"),
            ]
        );
    }

    #[test]
    fn test_top_played_panels() {
        let view = dashboard().render(Tab::TopPlayed, &january());
        let panels = panels(&view);

        let titles: Vec<_> = panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Artist Most Played", "Album Most Played", "Track Most Played"]);

        let Some(ChartSpec::RankedBar(artists)) = panels[0].chart_spec() else {
            panic!("expected artist bars");
        };
        let bars: Vec<_> = artists.bars.iter().map(|b| (b.category.as_str(), b.value)).collect();
        assert_eq!(bars, vec![("A", 8.0)]);

        assert!(matches!(panels[1].chart_spec(), Some(ChartSpec::Sunburst(_))));

        let Some(ChartSpec::RankedBar(tracks)) = panels[2].chart_spec() else {
            panic!("expected track bars");
        };
        let names: Vec<_> = tracks.bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Song2", "Song1"]);
    }

    #[test]
    fn test_timeline_and_habits_panels() {
        let dashboard = dashboard();

        let timeline = dashboard.render(Tab::Timeline, &DateSelection::unfiltered());
        let Some(ChartSpec::Area(area)) = panels(&timeline)[0].chart_spec() else {
            panic!("expected area chart");
        };
        assert_eq!(area.points.len(), 2);

        let habits = dashboard.render(Tab::Habits, &DateSelection::unfiltered());
        let Some(ChartSpec::Bubble(bubble)) = panels(&habits)[0].chart_spec() else {
            panic!("expected bubble chart");
        };
        assert_eq!(bubble.points.len(), 1);
        assert_eq!(bubble.points[0].value, 18.0);
        assert_eq!(bubble.size_max, 30.0);
    }

    #[test]
    fn test_failed_word_panel_leaves_sibling() {
        let dashboard = Dashboard::new(
            Dataset::from_events(vec![
                event("2021-01-01", "A", None, "Midnight City", 4.0),
                event("2021-01-02", "A", Some("!!!"), "Midnight Rain", 2.0),
            ]),
            DashboardConfig::default(),
        );
        let view = dashboard.render(Tab::Words, &DateSelection::unfiltered());
        let panels = panels(&view);

        assert_eq!(
            panels[0].body,
            PanelBody::Failed {
                message: "We need at least 1 word to plot a word cloud, got 0.".to_string()
            }
        );
        let Some(ChartSpec::WordCloud(cloud)) = panels[1].chart_spec() else {
            panic!("expected track word cloud");
        };
        assert_eq!(cloud.words[0].word, "Midnight");
        assert_eq!(cloud.words[0].count, 2);
        assert_eq!(view.metrics.total_minutes, "6");
    }

    #[test]
    fn test_empty_selection_renders_empty_charts() {
        let dashboard = dashboard();
        let selection = DateSelection::between(date("2023-01-01"), date("2023-01-31"));

        let view = dashboard.render(Tab::TopPlayed, &selection);
        assert_eq!(view.metrics.total_minutes, "0");
        assert_eq!(view.metrics.average_minutes, "0.00");
        for panel in panels(&view) {
            assert!(panel.chart_spec().is_some());
        }
    }

    #[test]
    fn test_view_serializes() {
        let view = dashboard().render(Tab::Timeline, &january());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["tab"], "timeline");
        assert_eq!(json["content"]["type"], "panels");
        assert_eq!(json["content"]["panels"][0]["body"]["status"], "chart");
        assert_eq!(json["content"]["panels"][0]["body"]["kind"], "area");
    }
}
