use kurbo::Point;

use crate::geometry::shape::{CircleShape, LineShape, PathShape, RectShape, Shape, TextShape};
use crate::session::state::BrushStyle;

/// Default width of a rectangle created by a single click.
pub const DEFAULT_RECT_WIDTH: f64 = 120.0;
/// Default height of a rectangle created by a single click.
pub const DEFAULT_RECT_HEIGHT: f64 = 80.0;
/// Default radius of a circle created by a single click.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 40.0;
/// Default length of a line created by a single click.
pub const DEFAULT_LINE_LENGTH: f64 = 120.0;
/// Default font size of a text mark.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// The active drawing tool.
pub enum Tool {
    /// No creation; pointer input manipulates existing objects (a surface
    /// concern, not a gesture one).
    #[default]
    Select,
    /// Continuous freehand stroke.
    Pen,
    Circle,
    Rectangle,
    Line,
    /// Inserts an editable text node at the click point.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// One pointer input sample, in surface coordinates.
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

#[derive(Clone, Debug, PartialEq)]
/// What a pointer sample did to the gesture state machine.
pub enum GestureOutcome {
    /// Nothing to do (select tool, stray move, pointer not down).
    Idle,
    /// A pen stroke is accumulating samples.
    InProgress,
    /// A completed shape ready to go onto the surface.
    Committed(Shape),
}

#[derive(Debug, Default)]
/// Turns pointer samples into shapes according to the active tool.
///
/// The pen is continuous: every move sample while the pointer is down
/// appends to the in-progress path, and lift commits one [`PathShape`].
/// The shape tools are discrete: a single pointer-down creates a
/// default-size shape anchored at the click point, and any subsequent drag
/// is a move/resize of that existing object — handled by the surface, never
/// a second creation.
pub struct GestureEngine {
    tool: Tool,
    pointer_down: bool,
    stroke: Vec<[f64; 2]>,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools, cancelling any in-progress stroke.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.pointer_down = false;
        self.stroke.clear();
    }

    /// Drop any in-progress gesture (mode exit, surface teardown).
    pub fn cancel(&mut self) {
        self.pointer_down = false;
        self.stroke.clear();
    }

    /// Feed one pointer sample.
    pub fn pointer(&mut self, event: PointerEvent, brush: &BrushStyle) -> GestureOutcome {
        match event {
            PointerEvent::Down(p) => self.pointer_down_at(p, brush),
            PointerEvent::Move(p) => {
                if self.tool == Tool::Pen && self.pointer_down {
                    self.stroke.push([p.x, p.y]);
                    GestureOutcome::InProgress
                } else {
                    GestureOutcome::Idle
                }
            }
            PointerEvent::Up(p) => {
                let was_down = self.pointer_down;
                self.pointer_down = false;
                if self.tool == Tool::Pen && was_down {
                    self.stroke.push([p.x, p.y]);
                    let points = std::mem::take(&mut self.stroke);
                    GestureOutcome::Committed(finish_stroke(points, brush))
                } else {
                    GestureOutcome::Idle
                }
            }
        }
    }

    fn pointer_down_at(&mut self, p: Point, brush: &BrushStyle) -> GestureOutcome {
        if self.pointer_down {
            // A second down without an up (lost capture); ignore it.
            return GestureOutcome::Idle;
        }
        self.pointer_down = true;

        match self.tool {
            Tool::Select => {
                self.pointer_down = false;
                GestureOutcome::Idle
            }
            Tool::Pen => {
                self.stroke.clear();
                self.stroke.push([p.x, p.y]);
                GestureOutcome::InProgress
            }
            Tool::Circle => {
                self.pointer_down = false;
                GestureOutcome::Committed(Shape::Circle(CircleShape {
                    left: p.x - DEFAULT_CIRCLE_RADIUS,
                    top: p.y - DEFAULT_CIRCLE_RADIUS,
                    radius: DEFAULT_CIRCLE_RADIUS,
                    stroke: brush.color.clone(),
                    stroke_width: brush.width,
                    fill: None,
                    scale_x: 1.0,
                    scale_y: 1.0,
                }))
            }
            Tool::Rectangle => {
                self.pointer_down = false;
                GestureOutcome::Committed(Shape::Rectangle(RectShape {
                    left: p.x - DEFAULT_RECT_WIDTH / 2.0,
                    top: p.y - DEFAULT_RECT_HEIGHT / 2.0,
                    width: DEFAULT_RECT_WIDTH,
                    height: DEFAULT_RECT_HEIGHT,
                    stroke: brush.color.clone(),
                    stroke_width: brush.width,
                    fill: None,
                    scale_x: 1.0,
                    scale_y: 1.0,
                }))
            }
            Tool::Line => {
                self.pointer_down = false;
                GestureOutcome::Committed(Shape::Line(LineShape {
                    left: p.x - DEFAULT_LINE_LENGTH / 2.0,
                    top: p.y,
                    width: DEFAULT_LINE_LENGTH,
                    height: 0.0,
                    stroke: brush.color.clone(),
                    stroke_width: brush.width,
                    scale_x: 1.0,
                    scale_y: 1.0,
                }))
            }
            Tool::Text => {
                self.pointer_down = false;
                GestureOutcome::Committed(Shape::Text(TextShape {
                    left: p.x,
                    top: p.y,
                    text: String::new(),
                    font_size: DEFAULT_FONT_SIZE,
                    fill: brush.color.clone(),
                    scale_x: 1.0,
                    scale_y: 1.0,
                }))
            }
        }
    }
}

fn finish_stroke(points: Vec<[f64; 2]>, brush: &BrushStyle) -> Shape {
    let left = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    let top = points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
    Shape::Path(PathShape {
        left: if left.is_finite() { left } else { 0.0 },
        top: if top.is_finite() { top } else { 0.0 },
        points,
        stroke: brush.color.clone(),
        stroke_width: brush.width,
        scale_x: 1.0,
        scale_y: 1.0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/tools/gesture.rs"]
mod tests;
