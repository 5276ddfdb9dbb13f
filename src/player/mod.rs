//! The owning player object: one surface, one state struct, one event seam
//! to the hosting page.

pub mod controller;
pub mod events;
