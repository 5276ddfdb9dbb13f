use crate::foundation::core::RenderedBox;
use crate::foundation::error::{ProofmarkError, ProofmarkResult};
use crate::geometry::shape::Shape;
use crate::surface::vector::{LoadMode, ReplayStyle, SurfaceFactory, VectorSurface};

#[derive(Debug)]
/// In-memory [`VectorSurface`] holding the shape list directly.
///
/// This is the surface used by headless hosts and by tests: besides the
/// shape list it counts every mutation, which is how synchronizer
/// idempotence is observable ("re-rendering an already-active annotation
/// performs zero surface mutations").
pub struct RecordingSurface {
    size: RenderedBox,
    shapes: Vec<Shape>,
    interactive: bool,
    replay_style: ReplayStyle,
    mutations: u64,
    disposed: bool,
}

impl RecordingSurface {
    pub fn new(size: RenderedBox) -> Self {
        Self {
            size,
            shapes: Vec::new(),
            interactive: true,
            replay_style: ReplayStyle::default(),
            mutations: 0,
            disposed: false,
        }
    }

    /// Use a non-default replay stroke style.
    pub fn with_replay_style(mut self, style: ReplayStyle) -> Self {
        self.replay_style = style;
        self
    }

    /// Number of state mutations (adds, clears, loads, resizes) so far.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Whether the current contents are editable (false after a replay load).
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ensure_live(&self) -> ProofmarkResult<()> {
        if self.disposed {
            return Err(ProofmarkError::surface("surface used after dispose"));
        }
        Ok(())
    }
}

impl VectorSurface for RecordingSurface {
    fn add_shape(&mut self, shape: Shape) -> ProofmarkResult<()> {
        self.ensure_live()?;
        self.shapes.push(shape);
        self.interactive = true;
        self.mutations += 1;
        Ok(())
    }

    fn clear(&mut self) -> ProofmarkResult<()> {
        self.ensure_live()?;
        self.shapes.clear();
        self.interactive = true;
        self.mutations += 1;
        Ok(())
    }

    fn shapes(&self) -> ProofmarkResult<Vec<Shape>> {
        self.ensure_live()?;
        Ok(self.shapes.clone())
    }

    fn load(&mut self, shapes: &[Shape], mode: LoadMode) -> ProofmarkResult<()> {
        self.ensure_live()?;
        match mode {
            LoadMode::Editable => {
                self.shapes = shapes.to_vec();
                self.interactive = true;
            }
            LoadMode::Replay => {
                self.shapes = self.replay_style.apply(shapes);
                self.interactive = false;
            }
        }
        self.mutations += 1;
        Ok(())
    }

    fn resize(&mut self, size: RenderedBox) -> ProofmarkResult<()> {
        self.ensure_live()?;
        self.size = size;
        self.mutations += 1;
        Ok(())
    }

    fn size(&self) -> RenderedBox {
        self.size
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn dispose(&mut self) {
        self.shapes.clear();
        self.disposed = true;
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Factory producing [`RecordingSurface`] instances.
pub struct RecordingSurfaceFactory;

impl SurfaceFactory for RecordingSurfaceFactory {
    type Surface = RecordingSurface;

    fn create(&mut self, size: RenderedBox) -> ProofmarkResult<Self::Surface> {
        Ok(RecordingSurface::new(size))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/recording.rs"]
mod tests;
