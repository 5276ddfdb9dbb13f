use crate::annotation::model::Annotation;
use crate::foundation::core::TimeMs;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One seek-bar marker.
pub struct TimelineMarker {
    /// Annotation this marker stands for.
    #[serde(rename = "annotationId")]
    pub annotation_id: String,
    /// The annotated video time.
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: TimeMs,
    /// Horizontal position as a percentage of the seek bar width.
    #[serde(rename = "leftPercent")]
    pub left_percent: f64,
    /// Whether this marker's annotation is the active one; rendered in a
    /// visually distinct state.
    pub active: bool,
}

/// Project annotations onto the seek bar.
///
/// Markers come out in stable timestamp order. A zero duration (metadata
/// not loaded yet) yields no markers rather than dividing by zero.
pub fn markers(
    annotations: &[Annotation],
    duration: TimeMs,
    active_id: Option<&str>,
) -> Vec<TimelineMarker> {
    if duration.0 == 0 {
        return Vec::new();
    }
    let mut out: Vec<TimelineMarker> = annotations
        .iter()
        .map(|a| TimelineMarker {
            annotation_id: a.id.clone(),
            timestamp_ms: a.timestamp_ms,
            left_percent: (a.timestamp_ms.0 as f64 / duration.0 as f64 * 100.0).clamp(0.0, 100.0),
            active: active_id == Some(a.id.as_str()),
        })
        .collect();
    out.sort_by(|a, b| {
        a.timestamp_ms
            .cmp(&b.timestamp_ms)
            .then_with(|| a.annotation_id.cmp(&b.annotation_id))
    });
    out
}

/// The seek target for a marker click, in the fractional seconds the video
/// element expects.
pub fn seek_seconds(timestamp: TimeMs) -> f64 {
    timestamp.as_secs_f64()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/markers.rs"]
mod tests;
