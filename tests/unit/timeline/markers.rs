use super::*;
use crate::geometry::shape::CanvasData;
use chrono::Utc;

fn ann(id: &str, ts: u64) -> Annotation {
    Annotation {
        id: id.to_string(),
        timestamp_ms: TimeMs(ts),
        comment: None,
        canvas_data: CanvasData::default(),
        created_at: Utc::now(),
    }
}

#[test]
fn markers_project_timestamps_as_percentages() {
    let annotations = vec![ann("a", 30_000), ann("b", 60_000)];
    let out = markers(&annotations, TimeMs(120_000), None);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].left_percent, 25.0);
    assert_eq!(out[1].left_percent, 50.0);
}

#[test]
fn markers_come_out_in_timestamp_order() {
    let annotations = vec![ann("late", 90_000), ann("early", 10_000)];
    let out = markers(&annotations, TimeMs(100_000), None);
    assert_eq!(out[0].annotation_id, "early");
    assert_eq!(out[1].annotation_id, "late");
}

#[test]
fn active_marker_is_flagged() {
    let annotations = vec![ann("a", 1000), ann("b", 2000)];
    let out = markers(&annotations, TimeMs(10_000), Some("b"));
    assert!(!out[0].active);
    assert!(out[1].active);
}

#[test]
fn zero_duration_yields_no_markers() {
    let annotations = vec![ann("a", 1000)];
    assert!(markers(&annotations, TimeMs(0), None).is_empty());
}

#[test]
fn timestamps_past_the_end_clamp_to_the_bar() {
    let annotations = vec![ann("a", 150_000)];
    let out = markers(&annotations, TimeMs(100_000), None);
    assert_eq!(out[0].left_percent, 100.0);
}

#[test]
fn seek_target_is_fractional_seconds() {
    assert_eq!(seek_seconds(TimeMs(2500)), 2.5);
}
