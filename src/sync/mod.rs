//! Playback-to-annotation matching.

pub mod synchronizer;
