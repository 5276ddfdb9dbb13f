//! Proofmark is the video annotation engine behind a client-approval
//! review tool.
//!
//! A viewer pauses a video, draws free-form marks or shapes anchored to the
//! exact timestamp, attaches a comment, and the mark replays later in
//! perfect visual alignment regardless of the pixel size the video happens
//! to be rendered at. The engine solves three coupled problems with no
//! tolerance for drift:
//!
//! 1. **Normalize**: geometry is persisted in one fixed reference
//!    resolution ([`REFERENCE_WIDTH`] × [`REFERENCE_HEIGHT`]) and converted
//!    to/from the live rendered box by a pure normalizer.
//! 2. **Match**: on every `timeupdate` a [`Synchronizer`] decides which
//!    annotation (if any) is active for the playback position, idempotently.
//! 3. **Capture**: a tool state machine turns pointer input into typed
//!    shapes, with drawing mode and playback mutually exclusive.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded, event-driven**: the video element is the only
//!   source of asynchronous timing; all engine work is synchronous inside
//!   its handlers and O(number of annotations).
//! - **Degrade, never crash**: persistence and rendering failures reduce to
//!   "no annotation overlay"; nothing here may take playback down.
//! - **Narrow seams**: any 2D backend implements [`VectorSurface`]; any
//!   transport implements [`AnnotationStore`].
#![forbid(unsafe_code)]

mod annotation;
mod foundation;
mod geometry;
mod history;
mod player;
mod session;
mod surface;
mod sync;
mod timeline;
mod tools;

pub use annotation::model::{Annotation, AnnotationDraft, sort_by_timestamp};
pub use annotation::store::{AnnotationStore, MemoryStore};
pub use foundation::core::{
    Affine, BezPath, Point, REFERENCE_HEIGHT, REFERENCE_WIDTH, Rect, RenderedBox, TimeMs, Vec2,
};
pub use foundation::error::{ProofmarkError, ProofmarkResult};
pub use geometry::normalize::{from_reference, to_reference};
pub use geometry::shape::{
    CanvasData, CircleShape, LineShape, PathShape, RectShape, Shape, TextShape,
};
pub use history::snapshots::{DEFAULT_HISTORY_LIMIT, History};
pub use player::controller::{DEFAULT_AUTO_CLEAR_MS, DEFAULT_THRESHOLD_MS, Player, PlayerConfig};
pub use player::events::{MediaEvent, PlayerSignal};
pub use session::state::{BrushStyle, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_WIDTH, SessionState};
pub use surface::raster::{OverlayFrame, RasterSurface, RasterSurfaceFactory};
pub use surface::recording::{RecordingSurface, RecordingSurfaceFactory};
pub use surface::vector::{LoadMode, ReplayStyle, SurfaceFactory, VectorSurface};
pub use sync::synchronizer::{SyncDecision, Synchronizer};
pub use timeline::markers::{TimelineMarker, markers, seek_seconds};
pub use tools::gesture::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_FONT_SIZE, DEFAULT_LINE_LENGTH, DEFAULT_RECT_HEIGHT,
    DEFAULT_RECT_WIDTH, GestureEngine, GestureOutcome, PointerEvent, Tool,
};
