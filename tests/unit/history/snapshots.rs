use super::*;
use crate::geometry::shape::{LineShape, Shape};

fn line(n: f64) -> Shape {
    Shape::Line(LineShape {
        left: n,
        top: n,
        width: 10.0,
        height: 0.0,
        stroke: "#fff".to_string(),
        stroke_width: 1.0,
        scale_x: 1.0,
        scale_y: 1.0,
    })
}

#[test]
fn undo_restores_prior_snapshots_in_order() {
    let mut history = History::default();
    // Draw three shapes, recording the state before each action.
    history.record(vec![]);
    history.record(vec![line(1.0)]);
    history.record(vec![line(1.0), line(2.0)]);
    let current = vec![line(1.0), line(2.0), line(3.0)];

    let two = history.undo(current).unwrap();
    assert_eq!(two.len(), 2);
    let one = history.undo(two).unwrap();
    assert_eq!(one.len(), 1);
    let empty = history.undo(one).unwrap();
    assert!(empty.is_empty());
    assert!(history.undo(empty).is_none());
}

#[test]
fn redo_mirrors_undo() {
    let mut history = History::default();
    history.record(vec![]);
    let restored = history.undo(vec![line(1.0)]).unwrap();
    assert!(restored.is_empty());
    assert!(history.can_redo());

    let again = history.redo(restored).unwrap();
    assert_eq!(again, vec![line(1.0)]);
    assert!(!history.can_redo());
    assert!(history.can_undo());
}

#[test]
fn a_fresh_action_clears_the_redo_stack() {
    let mut history = History::default();
    history.record(vec![]);
    let restored = history.undo(vec![line(1.0)]).unwrap();
    assert!(history.can_redo());

    // New drawing action after the undo.
    history.record(restored);
    assert!(!history.can_redo());
    assert!(history.redo(vec![line(9.0)]).is_none());
}

#[test]
fn undo_stack_is_bounded_dropping_oldest() {
    let mut history = History::new(3);
    for i in 0..10 {
        history.record(vec![line(i as f64)]);
    }
    // Only the three most recent snapshots survive.
    let a = history.undo(vec![]).unwrap();
    assert_eq!(a, vec![line(9.0)]);
    let b = history.undo(a).unwrap();
    assert_eq!(b, vec![line(8.0)]);
    let c = history.undo(b).unwrap();
    assert_eq!(c, vec![line(7.0)]);
    assert!(history.undo(c).is_none());
}

#[test]
fn clear_drops_both_stacks() {
    let mut history = History::default();
    history.record(vec![]);
    history.undo(vec![line(1.0)]).unwrap();
    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}
