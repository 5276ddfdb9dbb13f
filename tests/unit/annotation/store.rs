use super::*;
use crate::foundation::core::TimeMs;
use crate::geometry::shape::CanvasData;

fn draft(ts: u64, comment: Option<&str>) -> AnnotationDraft {
    AnnotationDraft {
        timestamp_ms: TimeMs(ts),
        comment: comment.map(str::to_string),
        canvas_data: CanvasData::default(),
    }
}

#[test]
fn create_assigns_ids_and_list_sorts_by_timestamp() {
    let mut store = MemoryStore::new();
    let a = store.create("proj", draft(9000, None)).unwrap();
    let b = store.create("proj", draft(1000, Some("first"))).unwrap();
    assert_ne!(a.id, b.id);

    let listed = store.list("proj").unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, b.id);
    assert_eq!(listed[1].id, a.id);
}

#[test]
fn list_is_scoped_by_project() {
    let mut store = MemoryStore::new();
    store.create("one", draft(0, None)).unwrap();
    store.create("two", draft(0, None)).unwrap();
    assert_eq!(store.list("one").unwrap().len(), 1);
    assert_eq!(store.list("missing").unwrap().len(), 0);
}

#[test]
fn update_comment_touches_only_the_comment() {
    let mut store = MemoryStore::new();
    let a = store.create("proj", draft(500, Some("before"))).unwrap();
    store
        .update_comment(&a.id, Some("after".to_string()))
        .unwrap();
    let listed = store.list("proj").unwrap();
    assert_eq!(listed[0].comment.as_deref(), Some("after"));
    assert_eq!(listed[0].timestamp_ms, a.timestamp_ms);
    assert_eq!(listed[0].canvas_data, a.canvas_data);
}

#[test]
fn delete_removes_and_unknown_ids_error() {
    let mut store = MemoryStore::new();
    let a = store.create("proj", draft(0, None)).unwrap();
    store.delete(&a.id).unwrap();
    assert!(store.is_empty());
    assert!(store.delete(&a.id).is_err());
    assert!(store.update_comment(&a.id, None).is_err());
}
