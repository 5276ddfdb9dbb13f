//! Projection of annotations onto the seek bar.

pub mod markers;
