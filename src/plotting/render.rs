//! Rasterises [`ChartSpec`] descriptions into RGB buffers with plotters.

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::f64::consts::TAU;
use std::ops::Range;

use super::chart::{
    AreaChart, BubbleChart, ChartSpec, RankedBarChart, SunburstChart, SunburstNode, WordCloudChart,
};
use super::styles::{ChartStyle, ChartTheme};

pub type PlotError = Box<dyn Error + Send + Sync>;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// A rendered chart as tightly packed RGB rows.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Draw a chart into a fresh `width` x `height` buffer.
pub fn render_chart(spec: &ChartSpec, width: u32, height: u32) -> Result<RenderedChart, PlotError> {
    let theme = ChartTheme::default();
    let style = ChartStyle::default();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&theme.background_color)?;

        match spec {
            ChartSpec::RankedBar(chart) => draw_ranked_bar(&root, chart, &theme, &style)?,
            ChartSpec::Sunburst(chart) => draw_sunburst(&root, chart, &theme, &style)?,
            ChartSpec::Area(chart) => draw_area(&root, chart, &theme, &style)?,
            ChartSpec::Bubble(chart) => draw_bubble(&root, chart, &theme, &style)?,
            ChartSpec::WordCloud(chart) => draw_word_cloud(&root, chart, &style)?,
        }

        root.present()?;
    }

    Ok(RenderedChart {
        width,
        height,
        pixels,
    })
}

fn segment_label(labels: &[String], v: &SegmentValue<u32>) -> String {
    match v {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_ranked_bar(
    root: &Area<'_>,
    chart: &RankedBarChart,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let rows = chart.bars.len().max(1) as u32;
    // leave room for the value text past the longest bar
    let x_max = (chart.max_value() * 1.25).max(1.0);
    let font = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color);

    let mut chart_builder = ChartBuilder::on(root)
        .margin(style.margin)
        .x_label_area_size(if chart.value_axis_visible { style.label_area_size } else { 0 })
        .y_label_area_size(style.label_area_size * 3)
        .build_cartesian_2d(0f64..x_max, (0u32..rows).into_segmented())?;

    let categories: Vec<String> = chart.bars.iter().map(|b| b.category.clone()).collect();
    let y_label_formatter = |v: &SegmentValue<u32>| segment_label(&categories, v);

    let mut mesh = chart_builder.configure_mesh();
    mesh.disable_mesh()
        .axis_style(theme.axis_color)
        .y_desc(chart.category_title.as_str())
        .y_labels(categories.len().max(1))
        .y_label_formatter(&y_label_formatter)
        .label_style(font.clone());
    if !chart.value_axis_visible {
        mesh.disable_x_axis();
    }
    mesh.draw()?;

    chart_builder.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let i = i as u32;
        let mut rect = Rectangle::new(
            [(0.0, SegmentValue::Exact(i)), (bar.value, SegmentValue::Exact(i + 1))],
            chart.palette.color(i as usize).filled(),
        );
        rect.set_margin(6, 6, 0, 0);
        rect
    }))?;

    if chart.show_values {
        let value_font = font.pos(Pos::new(HPos::Left, VPos::Center));
        chart_builder.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                format!(" {}", bar.value),
                (bar.value, SegmentValue::CenterOf(i as u32)),
                value_font.clone(),
            )
        }))?;
    }

    Ok(())
}

/// One annular wedge of a sunburst, angles in radians clockwise from 12 o'clock.
#[derive(Debug, Clone)]
pub struct RingSegment<'a> {
    pub node: &'a SunburstNode,
    pub start: f64,
    pub end: f64,
    pub inner: f64,
    pub outer: f64,
    /// Index of the top-level node this wedge descends from
    pub root_index: usize,
}

/// Lay out every node as a wedge. Children split their parent's angle in
/// proportion to their values; each level gets an equal ring width.
pub fn sunburst_segments(chart: &SunburstChart, radius: f64) -> Vec<RingSegment<'_>> {
    let mut segments = Vec::with_capacity(chart.nodes.len());
    let total = chart.total();
    if total <= 0.0 {
        return segments;
    }

    let ring = radius / chart.levels.len().max(1) as f64;
    let mut start = 0.0;
    for (root_index, node) in chart.roots().enumerate() {
        let span = node.value / total * TAU;
        push_segment(chart, node, start, span, ring, root_index, &mut segments);
        start += span;
    }
    segments
}

fn push_segment<'a>(
    chart: &'a SunburstChart,
    node: &'a SunburstNode,
    start: f64,
    span: f64,
    ring: f64,
    root_index: usize,
    out: &mut Vec<RingSegment<'a>>,
) {
    out.push(RingSegment {
        node,
        start,
        end: start + span,
        inner: node.depth as f64 * ring,
        outer: (node.depth + 1) as f64 * ring,
        root_index,
    });

    if node.value <= 0.0 {
        return;
    }
    let mut child_start = start;
    for child in chart.children(&node.id) {
        let child_span = span * child.value / node.value;
        push_segment(chart, child, child_start, child_span, ring, root_index, out);
        child_start += child_span;
    }
}

fn polar(center: (f64, f64), r: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + r * angle.sin()).round() as i32,
        (center.1 - r * angle.cos()).round() as i32,
    )
}

fn wedge_outline(seg: &RingSegment<'_>, center: (f64, f64)) -> Vec<(i32, i32)> {
    let steps = ((seg.end - seg.start) / TAU * 120.0).ceil().max(2.0) as usize;
    let angle_at = |k: usize| seg.start + (seg.end - seg.start) * k as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps).map(|k| polar(center, seg.outer, angle_at(k))).collect();
    if seg.inner > 0.0 {
        points.extend((0..=steps).rev().map(|k| polar(center, seg.inner, angle_at(k))));
    } else {
        points.push(polar(center, 0.0, 0.0));
    }
    points
}

fn draw_sunburst(
    root: &Area<'_>,
    chart: &SunburstChart,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (width, height) = root.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = (width.min(height) as f64 / 2.0 - style.margin as f64).max(1.0);
    let font = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for seg in sunburst_segments(chart, radius) {
        let fill = chart
            .palette
            .color(seg.root_index)
            .mix(1.0 - 0.25 * seg.node.depth as f64);
        root.draw(&Polygon::new(wedge_outline(&seg, center), fill.filled()))?;

        // skip labels on slivers
        if seg.end - seg.start > 0.25 {
            let at = polar(center, (seg.inner + seg.outer) / 2.0, (seg.start + seg.end) / 2.0);
            root.draw(&Text::new(seg.node.label.clone(), at, font.clone()))?;
        }
    }

    Ok(())
}

/// Calendar span of an area chart's x axis. A single day (or no data) is
/// widened to one day so the range is never empty.
pub fn date_span(chart: &AreaChart) -> Range<NaiveDate> {
    let first = chart.points.first().map(|p| p.date).unwrap_or_default();
    let last = chart.points.last().map(|p| p.date).unwrap_or(first);
    if last > first {
        first..last
    } else {
        first..first + Duration::days(1)
    }
}

fn draw_area(
    root: &Area<'_>,
    chart: &AreaChart,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let y_max = chart
        .points
        .iter()
        .map(|p| p.minutes)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart_builder = ChartBuilder::on(root)
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size + 10)
        .build_cartesian_2d(date_span(chart), 0f64..y_max)?;

    let x_label_formatter = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();

    let mut mesh = chart_builder.configure_mesh();
    mesh.light_line_style(TRANSPARENT)
        .bold_line_style(theme.axis_color.mix(0.1))
        .axis_style(theme.axis_color)
        .x_desc(chart.x_title.as_str())
        .y_desc(chart.y_title.as_str())
        .x_labels(5)
        .label_style(("sans-serif", style.font_size).into_font().color(&theme.text_color))
        .x_label_formatter(&x_label_formatter);
    mesh.draw()?;

    if chart.points.is_empty() {
        return Ok(());
    }

    let color = chart.palette.color(0);
    chart_builder.draw_series(
        AreaSeries::new(
            chart.points.iter().map(|p| (p.date, p.minutes)),
            0.0,
            color.mix(0.3),
        )
        .border_style(color),
    )?;

    Ok(())
}

fn draw_bubble(
    root: &Area<'_>,
    chart: &BubbleChart,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let columns = chart.x_categories.len().max(1) as u32;
    let rows = chart.y_categories.len().max(1) as u32;

    let mut chart_builder = ChartBuilder::on(root)
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size + 40)
        .build_cartesian_2d((0u32..columns).into_segmented(), (0u32..rows).into_segmented())?;

    let x_label_formatter = |v: &SegmentValue<u32>| segment_label(&chart.x_categories, v);
    let y_label_formatter = |v: &SegmentValue<u32>| segment_label(&chart.y_categories, v);

    let mut mesh = chart_builder.configure_mesh();
    mesh.light_line_style(TRANSPARENT)
        .bold_line_style(theme.axis_color.mix(0.1))
        .axis_style(theme.axis_color)
        .x_labels(columns as usize)
        .y_labels(rows as usize)
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&y_label_formatter)
        .label_style(("sans-serif", style.font_size - 3).into_font().color(&theme.text_color));
    mesh.draw()?;

    chart_builder.draw_series(chart.points.iter().map(|p| {
        let t = if chart.max_value > 0.0 {
            p.value / chart.max_value
        } else {
            0.0
        };
        // keep the smallest bubbles visible against the white background
        let color = chart.color_scale.sample(0.15 + 0.85 * t);
        Circle::new(
            (
                SegmentValue::CenterOf(p.hour.hour() as u32),
                SegmentValue::CenterOf(p.day.index() as u32),
            ),
            (p.size / 2.0).round() as i32,
            color.filled(),
        )
    }))?;

    Ok(())
}

/// A word placed by the flow layout, `x`/`y` being its top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord<'a> {
    pub word: &'a str,
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
    pub weight: f64,
}

/// Place words left to right in rows, biggest first, until the area is full.
pub fn word_cloud_layout(chart: &WordCloudChart, width: u32, height: u32, margin: u32) -> Vec<PlacedWord<'_>> {
    let margin = margin as i32;
    let right = width as i32 - margin;
    let bottom = height as i32 - margin;

    let mut placed = Vec::with_capacity(chart.words.len());
    let (mut x, mut y, mut row_height) = (margin, margin, 0);

    for word in &chart.words {
        let font_size = (12.0 + 36.0 * word.weight).round() as u32;
        let text_width = (word.word.chars().count() as f64 * font_size as f64 * 0.6).ceil() as i32;

        if x > margin && x + text_width > right {
            x = margin;
            y += row_height + 4;
            row_height = 0;
        }
        if y + font_size as i32 > bottom {
            break;
        }

        placed.push(PlacedWord {
            word: &word.word,
            x,
            y,
            font_size,
            weight: word.weight,
        });
        x += text_width + font_size as i32 / 2;
        row_height = row_height.max(font_size as i32);
    }

    placed
}

fn draw_word_cloud(root: &Area<'_>, chart: &WordCloudChart, style: &ChartStyle) -> Result<(), PlotError> {
    let (width, height) = root.dim_in_pixel();
    for word in word_cloud_layout(chart, width, height, style.margin) {
        let color = chart.color_scale.sample(0.45 + 0.55 * word.weight);
        root.draw(&Text::new(
            word.word.to_string(),
            (word.x, word.y),
            ("sans-serif", word.font_size).into_font().color(&color),
        ))?;
    }
    Ok(())
}
