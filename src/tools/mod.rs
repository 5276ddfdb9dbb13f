//! Drawing tools and the pointer-gesture state machine.

pub mod gesture;
