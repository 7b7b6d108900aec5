//! Chart descriptions built from aggregated tables.
//!
//! Nothing here knows how a chart is drawn: each builder maps a summary table
//! onto a [`ChartSpec`], which the renderer (or any other consumer of the
//! serialized form) turns into pixels.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::analysis::word_frequencies;
use crate::errors::Result;
use crate::types::{AlbumRanking, DailyMinutes, DayOfWeek, HabitCell, HourOfDay, RankedEntry};

pub const MINUTES_TITLE: &str = "Total Minutes Played";

/// Qualitative palette for categorical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Dark2,
}

/// Sequential colour scale for magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    YlGn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
}

/// How parent values relate to their children in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchValues {
    /// A parent's value is the total of its children
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    RankedBar(RankedBarChart),
    Sunburst(SunburstChart),
    Area(AreaChart),
    Bubble(BubbleChart),
    WordCloud(WordCloudChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBarChart {
    pub orientation: Orientation,
    pub category_title: String,
    pub value_axis_visible: bool,
    /// Draw each bar's value as text on the bar
    pub show_values: bool,
    pub palette: Palette,
    /// Bars in input order; the last one is drawn topmost
    pub bars: Vec<Bar>,
}

impl RankedBarChart {
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstNode {
    /// `/`-joined path from the root level, with `/` and `\` in labels
    /// backslash-escaped
    pub id: String,
    pub label: String,
    pub parent: Option<String>,
    pub depth: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunburstChart {
    pub levels: Vec<String>,
    pub branch_values: BranchValues,
    pub palette: Palette,
    /// Parents always precede their children
    pub nodes: Vec<SunburstNode>,
}

impl SunburstChart {
    pub fn roots(&self) -> impl Iterator<Item = &SunburstNode> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    pub fn children<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SunburstNode> + 'a {
        self.nodes
            .iter()
            .filter(move |n| n.parent.as_deref() == Some(id))
    }

    pub fn total(&self) -> f64 {
        self.roots().map(|n| n.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaPoint {
    pub date: NaiveDate,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChart {
    pub x_title: String,
    pub y_title: String,
    pub palette: Palette,
    pub points: Vec<AreaPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub hour: HourOfDay,
    pub day: DayOfWeek,
    pub value: f64,
    /// Marker diameter in pixels, never above the chart's `size_max`
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleChart {
    pub x_categories: Vec<String>,
    pub y_categories: Vec<String>,
    pub color_title: String,
    pub color_scale: ColorScale,
    pub size_max: f64,
    pub max_value: f64,
    pub points: Vec<BubblePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub count: usize,
    /// Count relative to the most frequent word, in (0, 1]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudChart {
    pub max_words: usize,
    pub color_scale: ColorScale,
    pub words: Vec<WordWeight>,
}

/// Horizontal bars, one per entity, in the order given.
pub fn ranked_bar(entries: &[RankedEntry]) -> ChartSpec {
    ChartSpec::RankedBar(RankedBarChart {
        orientation: Orientation::Horizontal,
        category_title: String::new(),
        value_axis_visible: false,
        show_values: true,
        palette: Palette::Dark2,
        bars: entries
            .iter()
            .map(|e| Bar {
                category: e.name.clone(),
                value: e.minutes,
            })
            .collect(),
    })
}

/// Escape `\` and `/` so that joined ids stay unambiguous.
fn escape_id_part(part: &str) -> String {
    part.replace('\\', "\\\\").replace('/', "\\/")
}

/// Album → minutes → play count hierarchy sized by minutes.
pub fn album_sunburst(albums: &[AlbumRanking]) -> ChartSpec {
    let mut nodes: Vec<SunburstNode> = Vec::new();
    // (parent node, label) -> node
    let mut index: HashMap<(Option<usize>, String), usize> = HashMap::new();

    for album in albums {
        let path = [
            album.album_name.clone(),
            album.minutes_played.to_string(),
            album.play_count.to_string(),
        ];

        let mut parent: Option<usize> = None;
        for (depth, label) in path.iter().enumerate() {
            let idx = *index.entry((parent, label.clone())).or_insert_with(|| {
                let escaped = escape_id_part(label);
                let (id, parent_id) = match parent {
                    Some(p) => (format!("{}/{}", nodes[p].id, escaped), Some(nodes[p].id.clone())),
                    None => (escaped, None),
                };
                nodes.push(SunburstNode {
                    id,
                    label: label.clone(),
                    parent: parent_id,
                    depth,
                    value: 0.0,
                });
                nodes.len() - 1
            });
            // every ancestor accumulates the leaf value exactly once
            nodes[idx].value += album.minutes_played;
            parent = Some(idx);
        }
    }

    ChartSpec::Sunburst(SunburstChart {
        levels: vec![
            "album_name".to_string(),
            "Minutes Played".to_string(),
            "Counts Albums Played".to_string(),
        ],
        branch_values: BranchValues::Total,
        palette: Palette::Dark2,
        nodes,
    })
}

/// Filled trend line of minutes per date.
pub fn minutes_area(series: &[DailyMinutes]) -> ChartSpec {
    ChartSpec::Area(AreaChart {
        x_title: String::new(),
        y_title: MINUTES_TITLE.to_string(),
        palette: Palette::Dark2,
        points: series
            .iter()
            .map(|d| AreaPoint {
                date: d.date,
                minutes: d.minutes,
            })
            .collect(),
    })
}

/// Diameter for a bubble, proportional to the square root of its value so
/// that marker area tracks magnitude.
pub fn bubble_size(value: f64, max_value: f64, size_max: f64) -> f64 {
    if max_value <= 0.0 || value <= 0.0 {
        return 0.0;
    }
    (size_max * (value / max_value).sqrt()).min(size_max)
}

/// Hour × weekday bubble matrix, hours on x and days on y in fixed order.
pub fn habits_bubble(cells: &[HabitCell], size_max: f64) -> ChartSpec {
    let max_value = cells.iter().map(|c| c.minutes).fold(0.0, f64::max);

    ChartSpec::Bubble(BubbleChart {
        x_categories: HourOfDay::all().map(|h| h.label()).collect(),
        y_categories: DayOfWeek::ALL.iter().map(|d| d.label().to_string()).collect(),
        color_title: MINUTES_TITLE.to_string(),
        color_scale: ColorScale::YlGn,
        size_max,
        max_value,
        points: cells
            .iter()
            .map(|c| BubblePoint {
                hour: c.hour,
                day: c.day,
                value: c.minutes,
                size: bubble_size(c.minutes, max_value, size_max),
            })
            .collect(),
    })
}

/// Word cloud over a normalized title blob. Fails when the blob has no words.
pub fn word_cloud(blob: &str, max_words: usize) -> Result<ChartSpec> {
    let frequencies = word_frequencies(blob, max_words)?;
    let top = frequencies.first().map(|w| w.count).unwrap_or(1).max(1) as f64;

    Ok(ChartSpec::WordCloud(WordCloudChart {
        max_words,
        color_scale: ColorScale::YlGn,
        words: frequencies
            .into_iter()
            .map(|w| WordWeight {
                weight: w.count as f64 / top,
                word: w.word,
                count: w.count,
            })
            .collect(),
    }))
}
