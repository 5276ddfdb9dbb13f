use crate::annotation::model::Annotation;
use crate::foundation::core::TimeMs;

#[derive(Clone, Debug, PartialEq, Eq)]
/// What the synchronizer decided for one playback-time sample.
///
/// Callers only apply this output; they never compare timestamps
/// themselves.
pub enum SyncDecision {
    /// The previously active annotation (or none) is still correct.
    /// Applying this must mutate nothing — no reload, no flicker.
    NoChange,
    /// A different annotation entered the threshold window.
    Activate {
        /// Id of the newly active annotation.
        id: String,
        /// Its index in the annotation slice passed to `evaluate`.
        index: usize,
    },
    /// No annotation is within the window but one was active: clear the
    /// overlay.
    Clear,
}

#[derive(Debug)]
/// Decides which annotation, if any, should be visually active for the
/// current playback position.
///
/// Runs inside the `timeupdate` handler at event frequency, so
/// [`Synchronizer::evaluate`] is a single O(n) pass that allocates only
/// when the active annotation actually changes.
pub struct Synchronizer {
    threshold: TimeMs,
    active: Option<String>,
}

impl Synchronizer {
    /// `threshold` is the maximum distance between playback position and an
    /// annotation timestamp for that annotation to be considered active.
    /// It is configuration: the hosting player injects it, call sites never
    /// hardcode one.
    pub fn new(threshold: TimeMs) -> Self {
        Self {
            threshold,
            active: None,
        }
    }

    /// Currently active annotation id, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Configured threshold window.
    pub fn threshold(&self) -> TimeMs {
        self.threshold
    }

    /// Evaluate one playback-time sample against the annotation list.
    #[tracing::instrument(level = "trace", skip(self, annotations))]
    pub fn evaluate(&mut self, now: TimeMs, annotations: &[Annotation]) -> SyncDecision {
        let nearest = annotations
            .iter()
            .enumerate()
            .min_by_key(|(_, a)| a.timestamp_ms.distance(now));

        match nearest {
            Some((index, a)) if a.timestamp_ms.distance(now) < self.threshold.0 => {
                if self.active.as_deref() == Some(a.id.as_str()) {
                    SyncDecision::NoChange
                } else {
                    self.active = Some(a.id.clone());
                    SyncDecision::Activate {
                        id: a.id.clone(),
                        index,
                    }
                }
            }
            _ => {
                if self.active.take().is_some() {
                    SyncDecision::Clear
                } else {
                    SyncDecision::NoChange
                }
            }
        }
    }

    /// Make `id` active unconditionally (explicit marker click — always
    /// wins, no threshold check).
    pub fn force_activate(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }

    /// Forget the active annotation without emitting a decision (the caller
    /// already cleared the overlay, e.g. on auto-clear or reload).
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/synchronizer.rs"]
mod tests;
