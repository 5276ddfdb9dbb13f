pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Width of the fixed reference resolution all persisted geometry is
/// expressed in. Any reader or writer of the `canvas_data` payload must
/// agree on this pair.
pub const REFERENCE_WIDTH: f64 = 1920.0;
/// Height of the fixed reference resolution. See [`REFERENCE_WIDTH`].
pub const REFERENCE_HEIGHT: f64 = 1080.0;

/// A point in media time, in integer milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Absolute distance to another time, in milliseconds.
    pub fn distance(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }

    /// This time as fractional seconds (the unit the video element seeks in).
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

/// The rendered bounding box of the hosting container, in CSS pixels.
///
/// Boxes are measured, not configured: a container that has not gone through
/// layout yet reports a zero-size box, which every consumer in this crate
/// treats as "not measurable yet" rather than an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderedBox {
    pub width: f64,
    pub height: f64,
}

impl RenderedBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both axes are finite and strictly positive.
    pub fn is_measurable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
