use crate::foundation::core::RenderedBox;
use crate::foundation::error::ProofmarkResult;
use crate::geometry::shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a batch of shapes is loaded onto a surface.
pub enum LoadMode {
    /// Live drawing state: objects stay selectable and editable.
    Editable,
    /// Read-only replay of a persisted annotation: objects are
    /// non-selectable, non-interactive and restyled with the replay stroke.
    Replay,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stroke styling applied to replayed (read-only) geometry so it reads as
/// playback, not as an editable mark.
pub struct ReplayStyle {
    /// Replacement stroke color.
    pub stroke: String,
    /// Multiplier applied to each shape's stroke width.
    pub width_scale: f64,
}

impl Default for ReplayStyle {
    fn default() -> Self {
        Self {
            stroke: "#ffd60a".to_string(),
            width_scale: 1.0,
        }
    }
}

impl ReplayStyle {
    /// Restyled copies of `shapes` for replay rendering.
    pub fn apply(&self, shapes: &[Shape]) -> Vec<Shape> {
        shapes
            .iter()
            .map(|shape| {
                let mut out = shape.clone();
                out.set_stroke(&self.stroke);
                match &mut out {
                    Shape::Path(s) => s.stroke_width *= self.width_scale,
                    Shape::Circle(s) => s.stroke_width *= self.width_scale,
                    Shape::Rectangle(s) => s.stroke_width *= self.width_scale,
                    Shape::Line(s) => s.stroke_width *= self.width_scale,
                    Shape::Text(_) => {}
                }
                out
            })
            .collect()
    }
}

/// A vector drawing overlay.
///
/// The trait is deliberately narrow so any 2D backend (DOM canvas, WebGL,
/// SVG, CPU raster) can implement it without touching normalizer or
/// synchronizer logic. Implementations are scoped resources: a surface is
/// created only once its hosting container is measurable, must be disposed
/// exactly once, and every method except [`VectorSurface::dispose`] fails
/// on a disposed surface rather than touching released state.
pub trait VectorSurface {
    /// Append one shape to the live shape list.
    fn add_shape(&mut self, shape: Shape) -> ProofmarkResult<()>;

    /// Remove all shapes.
    fn clear(&mut self) -> ProofmarkResult<()>;

    /// Serialize the current shape list.
    fn shapes(&self) -> ProofmarkResult<Vec<Shape>>;

    /// Replace the current shape list.
    fn load(&mut self, shapes: &[Shape], mode: LoadMode) -> ProofmarkResult<()>;

    /// Update the surface to a new rendered box. Geometry already on the
    /// surface is not rescaled here; the owner reloads it through the
    /// normalizer.
    fn resize(&mut self, size: RenderedBox) -> ProofmarkResult<()>;

    /// Current rendered box.
    fn size(&self) -> RenderedBox;

    /// Whether [`VectorSurface::dispose`] has run.
    fn is_disposed(&self) -> bool;

    /// Release everything the surface owns. Idempotent.
    fn dispose(&mut self);
}

/// Creates surfaces for a measurable container box.
///
/// The factory is the recreate seam: the owning player disposes and
/// re-creates the surface whenever the container's rendered box changes,
/// and defers the first creation until the box is measurable at all.
pub trait SurfaceFactory {
    /// Concrete surface type produced by this factory.
    type Surface: VectorSurface;

    /// Create a surface for the given box.
    fn create(&mut self, size: RenderedBox) -> ProofmarkResult<Self::Surface>;
}

#[cfg(test)]
#[path = "../../tests/unit/surface/vector.rs"]
mod tests;
