//! Portable vector geometry: the shape model persisted in `canvas_data` and
//! the pure reference-resolution normalizer.

pub mod normalize;
pub mod shape;
