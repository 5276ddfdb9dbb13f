use std::collections::BTreeMap;

use chrono::Utc;

use crate::annotation::model::{Annotation, AnnotationDraft, sort_by_timestamp};
use crate::foundation::error::{ProofmarkError, ProofmarkResult};

/// The persistence contract consumed by the core.
///
/// This is the shape of the collaborator, not its transport: hosts back it
/// with whatever API client they use. The core calls it synchronously from
/// its single-threaded event loop; hosts that persist asynchronously apply
/// results through the player's epoch-guarded load path so responses that
/// arrive after a dispose are discarded instead of hitting a stale surface.
pub trait AnnotationStore {
    /// All annotations for a project.
    fn list(&self, project_id: &str) -> ProofmarkResult<Vec<Annotation>>;

    /// Persist a new annotation and return the stored record (id and
    /// `created_at` assigned by the store).
    fn create(&mut self, project_id: &str, draft: AnnotationDraft) -> ProofmarkResult<Annotation>;

    /// Replace the comment of an existing annotation. Comment workflow
    /// only; geometry is immutable after creation.
    fn update_comment(&mut self, id: &str, comment: Option<String>) -> ProofmarkResult<()>;

    /// Delete an annotation.
    fn delete(&mut self, id: &str) -> ProofmarkResult<()>;
}

#[derive(Debug, Default)]
/// In-memory [`AnnotationStore`] used by tests and single-process hosts.
pub struct MemoryStore {
    next_id: u64,
    rows: BTreeMap<String, (String, Annotation)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored annotations across all projects.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl AnnotationStore for MemoryStore {
    fn list(&self, project_id: &str) -> ProofmarkResult<Vec<Annotation>> {
        let mut out: Vec<Annotation> = self
            .rows
            .values()
            .filter(|(project, _)| project == project_id)
            .map(|(_, ann)| ann.clone())
            .collect();
        sort_by_timestamp(&mut out);
        Ok(out)
    }

    fn create(&mut self, project_id: &str, draft: AnnotationDraft) -> ProofmarkResult<Annotation> {
        draft.validate()?;
        self.next_id += 1;
        let annotation = Annotation {
            id: format!("ann-{}", self.next_id),
            timestamp_ms: draft.timestamp_ms,
            comment: draft.comment,
            canvas_data: draft.canvas_data,
            created_at: Utc::now(),
        };
        self.rows.insert(
            annotation.id.clone(),
            (project_id.to_string(), annotation.clone()),
        );
        Ok(annotation)
    }

    fn update_comment(&mut self, id: &str, comment: Option<String>) -> ProofmarkResult<()> {
        let (_, annotation) = self
            .rows
            .get_mut(id)
            .ok_or_else(|| ProofmarkError::persistence(format!("unknown annotation '{id}'")))?;
        annotation.comment = comment;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> ProofmarkResult<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ProofmarkError::persistence(format!("unknown annotation '{id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/store.rs"]
mod tests;
