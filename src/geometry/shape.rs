use crate::foundation::error::{ProofmarkError, ProofmarkResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// A single vector mark on the drawing surface.
///
/// Shapes are plain data: the drawing surface captures them, the normalizer
/// rescales them, and the `canvas_data` payload serializes them. The wire
/// form is an object tagged with `type` (`path`, `circle`, `rectangle`,
/// `line`, `text`) whose remaining keys are the variant's fields in their
/// historical camelCase spelling, so payloads written by any player size
/// (or an earlier writer) keep parsing.
pub enum Shape {
    /// Freehand pen stroke.
    Path(PathShape),
    /// Circle outline, optionally filled.
    Circle(CircleShape),
    /// Axis-aligned rectangle outline, optionally filled.
    Rectangle(RectShape),
    /// Straight line segment.
    Line(LineShape),
    /// Editable text mark.
    Text(TextShape),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Freehand stroke: the sampled pointer positions of one pen gesture.
pub struct PathShape {
    /// Anchor (bounding-box minimum) of the stroke.
    pub left: f64,
    pub top: f64,
    /// Sampled stroke coordinates, absolute in the same space as `left`/`top`.
    pub points: Vec<[f64; 2]>,
    /// Stroke color (CSS color string).
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    /// Residual scale factors carried over from imported documents whose
    /// objects bake part of their size into a transform. Marks created by
    /// this engine always use `1.0`.
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Circle whose bounding box starts at (`left`, `top`).
pub struct CircleShape {
    pub left: f64,
    pub top: f64,
    pub radius: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned rectangle.
pub struct RectShape {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Line segment from (`left`, `top`) to (`left + width`, `top + height`).
///
/// `width`/`height` are signed extents, so a line may run in any direction.
pub struct LineShape {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text mark anchored at (`left`, `top`). Glyph layout is a host concern;
/// the engine only carries the content and style.
pub struct TextShape {
    pub left: f64,
    pub top: f64,
    /// UTF-8 text content. May be empty while the host editor is open.
    #[serde(default)]
    pub text: String,
    #[serde(rename = "fontSize", default = "default_font_size")]
    pub font_size: f64,
    /// Text color (CSS color string).
    pub fill: String,
    #[serde(rename = "scaleX", default = "default_scale")]
    pub scale_x: f64,
    #[serde(rename = "scaleY", default = "default_scale")]
    pub scale_y: f64,
}

fn default_scale() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    24.0
}

fn default_brush_color() -> String {
    "#ff0000".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The portable payload persisted per annotation: the shape list plus the
/// brush color that was active when the mark was committed.
///
/// An empty or missing `objects` list means "no drawing" and is never an
/// error; consumers render nothing.
pub struct CanvasData {
    #[serde(default)]
    pub objects: Vec<Shape>,
    #[serde(rename = "brushColor", default = "default_brush_color")]
    pub brush_color: String,
}

impl CanvasData {
    /// Whether this payload carries no geometry.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Validate payload invariants.
    pub fn validate(&self) -> ProofmarkResult<()> {
        if self.brush_color.trim().is_empty() {
            return Err(ProofmarkError::validation(
                "canvas_data brushColor must be non-empty",
            ));
        }
        for shape in &self.objects {
            shape.validate()?;
        }
        Ok(())
    }
}

impl Shape {
    /// Stroke (or, for text, fill) color of this shape.
    pub fn stroke(&self) -> &str {
        match self {
            Self::Path(s) => &s.stroke,
            Self::Circle(s) => &s.stroke,
            Self::Rectangle(s) => &s.stroke,
            Self::Line(s) => &s.stroke,
            Self::Text(s) => &s.fill,
        }
    }

    /// Replace the stroke (or text fill) color.
    pub fn set_stroke(&mut self, color: &str) {
        match self {
            Self::Path(s) => s.stroke = color.to_string(),
            Self::Circle(s) => s.stroke = color.to_string(),
            Self::Rectangle(s) => s.stroke = color.to_string(),
            Self::Line(s) => s.stroke = color.to_string(),
            Self::Text(s) => s.fill = color.to_string(),
        }
    }

    /// Validate shape invariants: finite coordinates, positive sizes and a
    /// non-empty color.
    pub fn validate(&self) -> ProofmarkResult<()> {
        let check_finite = |name: &str, v: f64| -> ProofmarkResult<()> {
            if !v.is_finite() {
                return Err(ProofmarkError::validation(format!(
                    "shape {name} must be finite"
                )));
            }
            Ok(())
        };

        if self.stroke().trim().is_empty() {
            return Err(ProofmarkError::validation("shape color must be non-empty"));
        }

        match self {
            Self::Path(s) => {
                check_finite("left", s.left)?;
                check_finite("top", s.top)?;
                validate_stroke_width(s.stroke_width)?;
                for p in &s.points {
                    check_finite("point x", p[0])?;
                    check_finite("point y", p[1])?;
                }
            }
            Self::Circle(s) => {
                check_finite("left", s.left)?;
                check_finite("top", s.top)?;
                validate_stroke_width(s.stroke_width)?;
                if !s.radius.is_finite() || s.radius <= 0.0 {
                    return Err(ProofmarkError::validation(
                        "circle radius must be finite and > 0",
                    ));
                }
            }
            Self::Rectangle(s) => {
                check_finite("left", s.left)?;
                check_finite("top", s.top)?;
                validate_stroke_width(s.stroke_width)?;
                if !s.width.is_finite() || s.width <= 0.0 || !s.height.is_finite() || s.height <= 0.0
                {
                    return Err(ProofmarkError::validation(
                        "rectangle width/height must be finite and > 0",
                    ));
                }
            }
            Self::Line(s) => {
                check_finite("left", s.left)?;
                check_finite("top", s.top)?;
                check_finite("width", s.width)?;
                check_finite("height", s.height)?;
                validate_stroke_width(s.stroke_width)?;
            }
            Self::Text(s) => {
                check_finite("left", s.left)?;
                check_finite("top", s.top)?;
                if !s.font_size.is_finite() || s.font_size <= 0.0 {
                    return Err(ProofmarkError::validation(
                        "text fontSize must be finite and > 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn validate_stroke_width(w: f64) -> ProofmarkResult<()> {
    if !w.is_finite() || w <= 0.0 {
        return Err(ProofmarkError::validation(
            "shape strokeWidth must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
