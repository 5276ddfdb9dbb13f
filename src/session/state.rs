use crate::foundation::core::TimeMs;
use crate::tools::gesture::Tool;

/// Default brush color for new sessions.
pub const DEFAULT_BRUSH_COLOR: &str = "#ff0000";
/// Default brush width in surface pixels.
pub const DEFAULT_BRUSH_WIDTH: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Active pen styling.
pub struct BrushStyle {
    pub color: String,
    pub width: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_BRUSH_COLOR.to_string(),
            width: DEFAULT_BRUSH_WIDTH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The single, ephemeral state struct for one player session.
///
/// Nothing in here is persisted. `active_annotation` is a weak reference:
/// an id looked up in the session's annotation list, never an owning
/// pointer — a deleted annotation simply stops resolving.
pub struct SessionState {
    /// Current playback position.
    pub current_time: TimeMs,
    /// Media duration (zero until metadata arrives).
    pub duration: TimeMs,
    /// Whether the video element is playing.
    pub is_playing: bool,
    /// Whether pointer input is being captured as geometry. Mutually
    /// exclusive with playback; see the player's mode handling.
    pub is_drawing_mode: bool,
    /// Active drawing tool.
    pub tool: Tool,
    /// Active pen styling.
    pub brush: BrushStyle,
    /// Id of the annotation currently replayed on the overlay, if any.
    pub active_annotation: Option<String>,
}
