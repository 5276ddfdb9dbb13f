use chrono::{DateTime, Utc};

use crate::foundation::core::TimeMs;
use crate::foundation::error::{ProofmarkError, ProofmarkResult};
use crate::geometry::shape::CanvasData;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A persisted annotation: a timestamp-anchored pairing of optional text
/// with portable vector geometry.
///
/// `canvas_data` coordinates are always reference-resolution units
/// ([`crate::REFERENCE_WIDTH`] × [`crate::REFERENCE_HEIGHT`]), never the
/// pixel size the player happened to have when the mark was drawn. The core
/// creates geometry exactly once, at commit time, and never mutates it
/// afterwards; comment threads appended later are a collaborator concern.
pub struct Annotation {
    /// Stable identifier assigned by the persistence collaborator.
    pub id: String,
    /// The exact video time this mark belongs to.
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: TimeMs,
    /// Optional comment attached when the mark was committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Portable vector geometry plus style metadata.
    pub canvas_data: CanvasData,
    /// Creation instant, assigned by the persistence collaborator.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The create payload handed to the persistence collaborator on commit.
pub struct AnnotationDraft {
    #[serde(rename = "timestampMs")]
    pub timestamp_ms: TimeMs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub canvas_data: CanvasData,
}

impl Annotation {
    /// Validate record invariants.
    pub fn validate(&self) -> ProofmarkResult<()> {
        if self.id.trim().is_empty() {
            return Err(ProofmarkError::validation("annotation id must be non-empty"));
        }
        self.canvas_data.validate()
    }
}

impl AnnotationDraft {
    /// Validate draft invariants before handing it to the store.
    pub fn validate(&self) -> ProofmarkResult<()> {
        self.canvas_data.validate()
    }
}

/// Stable sort by timestamp (id as tiebreaker), the order the timeline
/// marker renderer relies on.
pub fn sort_by_timestamp(annotations: &mut [Annotation]) {
    annotations.sort_by(|a, b| {
        a.timestamp_ms
            .cmp(&b.timestamp_ms)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/model.rs"]
mod tests;
