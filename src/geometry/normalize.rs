use crate::foundation::core::{REFERENCE_HEIGHT, REFERENCE_WIDTH, RenderedBox};
use crate::geometry::shape::Shape;

/// Convert shapes from the given rendered box into reference-resolution
/// units (the only space geometry is persisted in).
///
/// Pure function: no surface, no side effects. A non-measurable box (zero,
/// negative or non-finite on either axis) returns the input unchanged
/// rather than dividing by zero.
pub fn to_reference(shapes: &[Shape], rendered: RenderedBox) -> Vec<Shape> {
    if !rendered.is_measurable() {
        return shapes.to_vec();
    }
    scale_shapes(
        shapes,
        REFERENCE_WIDTH / rendered.width,
        REFERENCE_HEIGHT / rendered.height,
    )
}

/// Convert shapes from reference-resolution units into the given rendered
/// box. Inverse of [`to_reference`]; same guard for non-measurable boxes.
pub fn from_reference(shapes: &[Shape], rendered: RenderedBox) -> Vec<Shape> {
    if !rendered.is_measurable() {
        return shapes.to_vec();
    }
    scale_shapes(
        shapes,
        rendered.width / REFERENCE_WIDTH,
        rendered.height / REFERENCE_HEIGHT,
    )
}

/// Per-axis scaling of every field that carries a unit: positions by their
/// axis, `width`/`radius` by x, `height` by y, path points per axis, and any
/// residual scale factors multiplied (never replaced).
fn scale_shapes(shapes: &[Shape], sx: f64, sy: f64) -> Vec<Shape> {
    shapes
        .iter()
        .map(|shape| {
            let mut out = shape.clone();
            match &mut out {
                Shape::Path(s) => {
                    s.left *= sx;
                    s.top *= sy;
                    for p in &mut s.points {
                        p[0] *= sx;
                        p[1] *= sy;
                    }
                    s.scale_x *= sx;
                    s.scale_y *= sy;
                }
                Shape::Circle(s) => {
                    s.left *= sx;
                    s.top *= sy;
                    s.radius *= sx;
                    s.scale_x *= sx;
                    s.scale_y *= sy;
                }
                Shape::Rectangle(s) => {
                    s.left *= sx;
                    s.top *= sy;
                    s.width *= sx;
                    s.height *= sy;
                    s.scale_x *= sx;
                    s.scale_y *= sy;
                }
                Shape::Line(s) => {
                    s.left *= sx;
                    s.top *= sy;
                    s.width *= sx;
                    s.height *= sy;
                    s.scale_x *= sx;
                    s.scale_y *= sy;
                }
                Shape::Text(s) => {
                    s.left *= sx;
                    s.top *= sy;
                    s.font_size *= sy;
                    s.scale_x *= sx;
                    s.scale_y *= sy;
                }
            }
            out
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/normalize.rs"]
mod tests;
