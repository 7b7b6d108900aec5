use super::chart::*;
use super::render::{date_span, render_chart, sunburst_segments, word_cloud_layout};
use crate::types::{AlbumRanking, DailyMinutes, DayOfWeek, HabitCell, HourOfDay, RankedEntry};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::f64::consts::TAU;

fn albums() -> Vec<AlbumRanking> {
    vec![
        AlbumRanking {
            album_name: "Beta".to_string(),
            minutes_played: 10.0,
            play_count: 1,
        },
        AlbumRanking {
            album_name: "Alpha".to_string(),
            minutes_played: 8.5,
            play_count: 2,
        },
        AlbumRanking {
            album_name: "Gamma".to_string(),
            minutes_played: 3.25,
            play_count: 4,
        },
    ]
}

fn sunburst() -> SunburstChart {
    match album_sunburst(&albums()) {
        ChartSpec::Sunburst(chart) => chart,
        other => panic!("expected sunburst, got {:?}", other),
    }
}

#[test]
fn test_ranked_bar_keeps_input_order() {
    let entries = vec![
        RankedEntry {
            name: "C".to_string(),
            minutes: 1.5,
        },
        RankedEntry {
            name: "A".to_string(),
            minutes: 8.0,
        },
    ];
    let ChartSpec::RankedBar(chart) = ranked_bar(&entries) else {
        panic!("expected ranked bar");
    };

    let bars: Vec<_> = chart.bars.iter().map(|b| (b.category.as_str(), b.value)).collect();
    assert_eq!(bars, vec![("C", 1.5), ("A", 8.0)]);
    assert_eq!(chart.orientation, Orientation::Horizontal);
    assert!(!chart.value_axis_visible);
    assert!(chart.show_values);
    assert_eq!(chart.max_value(), 8.0);
}

#[test]
fn test_sunburst_parent_equals_sum_of_children() {
    let chart = sunburst();
    assert_eq!(chart.branch_values, BranchValues::Total);

    for node in &chart.nodes {
        let children: Vec<_> = chart.children(&node.id).collect();
        if children.is_empty() {
            assert_eq!(node.depth, 2);
            continue;
        }
        let sum: f64 = children.iter().map(|c| c.value).sum();
        assert!((node.value - sum).abs() < 1e-9, "node {} = {} but children sum to {}", node.id, node.value, sum);
    }

    assert!((chart.total() - 21.75).abs() < 1e-9);
}

#[test]
fn test_sunburst_levels_and_labels() {
    let chart = sunburst();
    let ids: Vec<_> = chart.nodes.iter().filter(|n| n.parent.is_none()).map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["Beta", "Alpha", "Gamma"]);

    let alpha: Vec<_> = chart.nodes.iter().filter(|n| n.id.starts_with("Alpha")).map(|n| n.label.as_str()).collect();
    assert_eq!(alpha, vec!["Alpha", "8.5", "2"]);
}

#[test]
fn test_sunburst_slash_in_album_name() {
    let albums = vec![
        AlbumRanking {
            album_name: "Live/12.5".to_string(),
            minutes_played: 20.0,
            play_count: 1,
        },
        AlbumRanking {
            album_name: "Live".to_string(),
            minutes_played: 12.5,
            play_count: 3,
        },
    ];
    let ChartSpec::Sunburst(chart) = album_sunburst(&albums) else {
        panic!("expected sunburst");
    };

    let roots: Vec<_> = chart.roots().map(|n| (n.label.as_str(), n.value)).collect();
    assert_eq!(roots, vec![("Live/12.5", 20.0), ("Live", 12.5)]);
    assert!((chart.total() - 32.5).abs() < 1e-9);
    assert_eq!(chart.nodes.len(), 6);

    for node in &chart.nodes {
        let children: Vec<_> = chart.children(&node.id).collect();
        assert!(children.iter().all(|c| c.depth == node.depth + 1));
        if node.depth < 2 {
            assert_eq!(children.len(), 1, "node {}", node.id);
            assert_eq!(children[0].value, node.value);
        }
    }
}

#[test]
fn test_area_is_chronological_copy() {
    let series = vec![
        DailyMinutes {
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            minutes: 5.0,
        },
        DailyMinutes {
            date: NaiveDate::from_ymd_opt(2021, 1, 2).unwrap(),
            minutes: 2.0,
        },
    ];
    let ChartSpec::Area(chart) = minutes_area(&series) else {
        panic!("expected area chart");
    };
    assert_eq!(chart.points.len(), 2);
    assert!(chart.points[0].date < chart.points[1].date);
    assert_eq!(chart.y_title, MINUTES_TITLE);
    assert_eq!(series.len(), 2);
}

#[test]
fn test_area_axis_follows_calendar() {
    let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    let series = vec![
        DailyMinutes {
            date: day("2021-01-01"),
            minutes: 5.0,
        },
        DailyMinutes {
            date: day("2021-01-02"),
            minutes: 2.0,
        },
        DailyMinutes {
            date: day("2021-03-01"),
            minutes: 4.0,
        },
    ];
    let ChartSpec::Area(chart) = minutes_area(&series) else {
        panic!("expected area chart");
    };
    let span = date_span(&chart);
    assert_eq!(span, day("2021-01-01")..day("2021-03-01"));
    assert_eq!((span.end - span.start).num_days(), 59);

    let ChartSpec::Area(single) = minutes_area(&series[..1]) else {
        panic!("expected area chart");
    };
    assert_eq!(date_span(&single), day("2021-01-01")..day("2021-01-02"));

    let ChartSpec::Area(empty) = minutes_area(&[]) else {
        panic!("expected area chart");
    };
    assert!(!date_span(&empty).is_empty());
}

#[test]
fn test_bubble_categories_and_size_cap() {
    let cells = vec![
        HabitCell {
            day: DayOfWeek::Monday,
            hour: HourOfDay::new(8).unwrap(),
            minutes: 100.0,
        },
        HabitCell {
            day: DayOfWeek::Sunday,
            hour: HourOfDay::new(23).unwrap(),
            minutes: 25.0,
        },
    ];
    let ChartSpec::Bubble(chart) = habits_bubble(&cells, 30.0) else {
        panic!("expected bubble chart");
    };

    assert_eq!(chart.x_categories.len(), 24);
    assert_eq!(chart.x_categories.first().map(String::as_str), Some("12 am"));
    assert_eq!(chart.x_categories[12], "12 pm");
    assert_eq!(chart.x_categories.last().map(String::as_str), Some("11 pm"));
    assert_eq!(chart.y_categories.first().map(String::as_str), Some("Sunday"));
    assert_eq!(chart.y_categories.last().map(String::as_str), Some("Saturday"));

    assert_eq!(chart.points[0].size, 30.0);
    assert_eq!(chart.points[1].size, 15.0);
    assert!(chart.points.iter().all(|p| p.size <= chart.size_max));

    let json = serde_json::to_value(ChartSpec::Bubble(chart.clone())).unwrap();
    assert_eq!(json["points"][0]["hour"], "8 am");
    assert_eq!(json["points"][0]["day"], "Monday");
    assert!(chart.x_categories.iter().any(|c| json["points"][1]["hour"] == c.as_str()));
}

#[test]
fn test_bubble_size_edges() {
    assert_eq!(bubble_size(0.0, 10.0, 30.0), 0.0);
    assert_eq!(bubble_size(5.0, 0.0, 30.0), 0.0);
    assert_eq!(bubble_size(20.0, 10.0, 30.0), 30.0);
}

#[test]
fn test_word_cloud_weights() {
    let ChartSpec::WordCloud(chart) = word_cloud("Test Test Song", 50).unwrap() else {
        panic!("expected word cloud");
    };
    assert_eq!(chart.max_words, 50);
    assert_eq!(chart.words.len(), 2);
    assert_eq!(chart.words[0].weight, 1.0);
    assert_eq!(chart.words[1].weight, 0.5);
}

#[test]
fn test_word_cloud_empty_input_fails() {
    assert!(word_cloud("   ", 50).is_err());
}

#[test]
fn test_chart_spec_serializes_with_kind_tag() {
    let spec = ranked_bar(&[RankedEntry {
        name: "A".to_string(),
        minutes: 8.0,
    }]);
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["kind"], "ranked_bar");
    assert_eq!(json["bars"][0]["category"], "A");
    assert_eq!(json["palette"], "dark2");
}

#[test]
fn test_sunburst_segments_cover_each_ring() {
    let chart = sunburst();
    let segments = sunburst_segments(&chart, 90.0);
    assert_eq!(segments.len(), chart.nodes.len());

    for depth in 0..3 {
        let sweep: f64 = segments
            .iter()
            .filter(|s| s.node.depth == depth)
            .map(|s| s.end - s.start)
            .sum();
        assert!((sweep - TAU).abs() < 1e-9);
    }

    let outermost = segments.iter().map(|s| s.outer).fold(0.0, f64::max);
    assert!((outermost - 90.0).abs() < 1e-9);
}

#[test]
fn test_sunburst_segments_empty() {
    let ChartSpec::Sunburst(chart) = album_sunburst(&[]) else {
        panic!("expected sunburst");
    };
    assert!(sunburst_segments(&chart, 90.0).is_empty());
}

#[test]
fn test_word_cloud_layout_stays_inside() {
    let blob: String = (0..50).map(|i| format!("lyric{} ", i % 17)).collect();
    let ChartSpec::WordCloud(chart) = word_cloud(&blob, 50).unwrap() else {
        panic!("expected word cloud");
    };

    let placed = word_cloud_layout(&chart, 320, 240, 10);
    assert!(!placed.is_empty());
    for word in &placed {
        assert!(word.x >= 10 && word.y >= 10);
        assert!(word.y + word.font_size as i32 <= 230);
    }
    assert!(placed.windows(2).all(|w| w[0].font_size >= w[1].font_size));
}

#[test]
#[ignore = "needs system fonts"]
fn test_render_every_chart_kind() {
    let specs = vec![
        ranked_bar(&[RankedEntry {
            name: "A".to_string(),
            minutes: 8.0,
        }]),
        album_sunburst(&albums()),
        minutes_area(&[]),
        habits_bubble(&[], 30.0),
    ];
    for spec in specs {
        let rendered = render_chart(&spec, 320, 240).unwrap();
        assert_eq!(rendered.pixels.len(), 320 * 240 * 3);
        assert!(rendered.pixels.iter().any(|&p| p != 255));
    }
}
