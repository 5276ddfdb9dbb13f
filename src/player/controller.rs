use crate::annotation::model::{Annotation, AnnotationDraft, sort_by_timestamp};
use crate::annotation::store::AnnotationStore;
use crate::foundation::core::{RenderedBox, TimeMs};
use crate::foundation::error::{ProofmarkError, ProofmarkResult};
use crate::geometry::normalize::{from_reference, to_reference};
use crate::geometry::shape::CanvasData;
use crate::history::snapshots::{DEFAULT_HISTORY_LIMIT, History};
use crate::player::events::{MediaEvent, PlayerSignal};
use crate::session::state::SessionState;
use crate::surface::vector::{LoadMode, SurfaceFactory, VectorSurface};
use crate::sync::synchronizer::{SyncDecision, Synchronizer};
use crate::timeline::markers::{TimelineMarker, markers, seek_seconds};
use crate::tools::gesture::{GestureEngine, GestureOutcome, PointerEvent, Tool};

/// Default threshold window.
pub const DEFAULT_THRESHOLD_MS: u64 = 3000;
/// Default auto-clear window during active playback.
pub const DEFAULT_AUTO_CLEAR_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Player tuning. Every value here is injectable configuration — in
/// particular the threshold window, which the source product hardcoded
/// inconsistently across player variants.
pub struct PlayerConfig {
    /// Maximum distance between playback position and an annotation's
    /// timestamp for the annotation to become active.
    pub threshold: TimeMs,
    /// If set, an activated annotation is cleared from the overlay after
    /// this long of continued playback. `None` disables auto-clear.
    pub auto_clear: Option<TimeMs>,
    /// Bound on the undo/redo stacks.
    pub history_limit: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            threshold: TimeMs(DEFAULT_THRESHOLD_MS),
            auto_clear: Some(TimeMs(DEFAULT_AUTO_CLEAR_MS)),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// The owning player: video events in, overlay state and host signals out.
///
/// One `Player` owns the session state, the (optional) drawing surface, the
/// undo/redo history, the synchronizer and the annotation list. The surface
/// is a scoped resource: it exists only between the first measurable
/// container box and `dispose`, and is disposed-and-recreated whenever the
/// container's rendered box changes — every acquisition path below has a
/// matching, unconditional release path.
pub struct Player<F: SurfaceFactory> {
    config: PlayerConfig,
    factory: F,
    project_id: String,
    state: SessionState,
    surface: Option<F::Surface>,
    gesture: GestureEngine,
    history: History,
    sync: Synchronizer,
    annotations: Vec<Annotation>,
    source_url: Option<String>,
    load_epoch: u64,
    active_since: Option<TimeMs>,
}

impl<F: SurfaceFactory> Player<F> {
    /// Create a player for one project's annotation set.
    pub fn new(project_id: impl Into<String>, config: PlayerConfig, factory: F) -> Self {
        let sync = Synchronizer::new(config.threshold);
        let history = History::new(config.history_limit);
        Self {
            config,
            factory,
            project_id: project_id.into(),
            state: SessionState::default(),
            surface: None,
            gesture: GestureEngine::new(),
            history,
            sync,
            annotations: Vec::new(),
            source_url: None,
            load_epoch: 0,
            active_since: None,
        }
    }

    /// Set the video source the hosting page mounts into its element.
    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// The video source URL, if one was provided.
    pub fn source(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The annotation list, in stable timestamp order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The live drawing surface, if the container has been measured.
    pub fn surface(&self) -> Option<&F::Surface> {
        self.surface.as_ref()
    }

    /// Seek-bar markers for the current annotation list.
    pub fn markers(&self) -> Vec<TimelineMarker> {
        markers(
            &self.annotations,
            self.state.duration,
            self.state.active_annotation.as_deref(),
        )
    }

    // ---- video element events -------------------------------------------

    /// Handle one event from the hosting video element.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> ProofmarkResult<Vec<PlayerSignal>> {
        let mut signals = Vec::new();
        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.state.duration = duration;
                signals.push(PlayerSignal::DurationChange(duration));
            }
            MediaEvent::CanPlay => {}
            MediaEvent::Play => {
                if self.state.is_drawing_mode {
                    // Playback must never run while pointer input is being
                    // captured; force the element back to paused.
                    signals.push(PlayerSignal::RequestPause);
                } else if !self.state.is_playing {
                    self.state.is_playing = true;
                    signals.push(PlayerSignal::PlayPauseChange(true));
                }
            }
            MediaEvent::Pause => {
                if self.state.is_playing {
                    self.state.is_playing = false;
                    signals.push(PlayerSignal::PlayPauseChange(false));
                }
            }
            MediaEvent::TimeUpdate(t) | MediaEvent::Seeked(t) => {
                self.state.current_time = t;
                signals.push(PlayerSignal::TimeUpdate(t));
                if !self.state.is_drawing_mode {
                    self.synchronize()?;
                }
            }
        }
        Ok(signals)
    }

    /// The hosting container was (re)measured.
    ///
    /// First measurable box acquires the surface; a changed box disposes
    /// and re-creates it, carrying live geometry across through the
    /// reference space. A non-measurable box is transient (layout has not
    /// run yet) and is retried on the next layout-affecting event.
    #[tracing::instrument(skip(self))]
    pub fn container_resized(&mut self, size: RenderedBox) -> ProofmarkResult<()> {
        if !size.is_measurable() {
            tracing::debug!(?size, "container box not measurable yet");
            return Ok(());
        }
        if let Some(existing) = &self.surface
            && existing.size() == size
        {
            return Ok(());
        }

        // Release unconditionally before acquiring the replacement.
        let carried = match self.surface.take() {
            Some(mut old) => {
                let prior = old.size();
                let shapes = old.shapes();
                old.dispose();
                shapes.map(|s| from_reference(&to_reference(&s, prior), size))
            }
            None => Ok(Vec::new()),
        };

        let mut surface = self.factory.create(size)?;
        if self.state.is_drawing_mode {
            let carried = carried?;
            if !carried.is_empty() {
                surface.load(&carried, LoadMode::Editable)?;
            }
            // Undo snapshots are in the old box's units; drop them rather
            // than restore misscaled geometry later.
            self.history.clear();
        }
        self.surface = Some(surface);

        // Replay content reloads at the new scale.
        if !self.state.is_drawing_mode
            && let Some(active) = self.state.active_annotation.clone()
            && let Some(index) = self.annotations.iter().position(|a| a.id == active)
        {
            self.load_annotation_geometry(index)?;
        }
        Ok(())
    }

    /// Tear the player down: dispose the surface and invalidate in-flight
    /// annotation loads.
    pub fn dispose(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        self.load_epoch += 1;
        self.gesture.cancel();
        self.history.clear();
    }

    // ---- drawing mode and tools -----------------------------------------

    /// Enter or leave drawing mode.
    ///
    /// Entering synchronously forces playback off (the pause command is in
    /// the returned signals) before any pointer input is accepted, and
    /// starts from a clean overlay. Leaving discards uncommitted geometry
    /// and disposes/re-creates the surface; it never auto-resumes playback.
    pub fn set_drawing_mode(&mut self, on: bool) -> ProofmarkResult<Vec<PlayerSignal>> {
        if on == self.state.is_drawing_mode {
            return Ok(Vec::new());
        }
        let mut signals = Vec::new();
        if on {
            if self.state.is_playing {
                self.state.is_playing = false;
                signals.push(PlayerSignal::RequestPause);
                signals.push(PlayerSignal::PlayPauseChange(false));
            }
            self.state.is_drawing_mode = true;
            self.state.active_annotation = None;
            self.active_since = None;
            self.sync.reset();
            self.history.clear();
            self.gesture.cancel();
            if let Some(surface) = self.surface.as_mut() {
                surface.clear()?;
            }
        } else {
            self.state.is_drawing_mode = false;
            self.gesture.cancel();
            self.history.clear();
            self.recreate_surface();
        }
        Ok(signals)
    }

    /// Toggle playback from a host affordance (button, shortcut).
    ///
    /// Rejected with no state change while drawing mode is active.
    pub fn toggle_play(&mut self) -> Vec<PlayerSignal> {
        if self.state.is_drawing_mode {
            return Vec::new();
        }
        self.state.is_playing = !self.state.is_playing;
        if self.state.is_playing {
            vec![
                PlayerSignal::RequestPlay,
                PlayerSignal::PlayPauseChange(true),
            ]
        } else {
            vec![
                PlayerSignal::RequestPause,
                PlayerSignal::PlayPauseChange(false),
            ]
        }
    }

    /// Switch the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
        self.gesture.set_tool(tool);
    }

    /// Change the brush color for subsequent marks.
    pub fn set_brush_color(&mut self, color: impl Into<String>) -> ProofmarkResult<()> {
        let color = color.into();
        if color.trim().is_empty() {
            return Err(ProofmarkError::validation("brush color must be non-empty"));
        }
        self.state.brush.color = color;
        Ok(())
    }

    /// Change the brush width for subsequent marks.
    pub fn set_brush_width(&mut self, width: f64) -> ProofmarkResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ProofmarkError::validation(
                "brush width must be finite and > 0",
            ));
        }
        self.state.brush.width = width;
        Ok(())
    }

    /// Feed one pointer sample from the overlay.
    ///
    /// Ignored outside drawing mode (and before the surface exists). A
    /// completed gesture records the prior geometry for undo and puts the
    /// new shape on the surface.
    pub fn pointer(&mut self, event: PointerEvent) -> ProofmarkResult<GestureOutcome> {
        if !self.state.is_drawing_mode || self.surface.is_none() {
            return Ok(GestureOutcome::Idle);
        }
        let outcome = self.gesture.pointer(event, &self.state.brush);
        if let GestureOutcome::Committed(shape) = &outcome {
            let surface = self
                .surface
                .as_mut()
                .ok_or_else(|| ProofmarkError::surface("no drawing surface"))?;
            let prior = surface.shapes()?;
            self.history.record(prior);
            surface.add_shape(shape.clone())?;
        }
        Ok(outcome)
    }

    /// Undo the last completed drawing action. Returns whether anything
    /// changed.
    pub fn undo(&mut self) -> ProofmarkResult<bool> {
        if !self.state.is_drawing_mode {
            return Ok(false);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };
        let current = surface.shapes()?;
        match self.history.undo(current) {
            Some(prev) => {
                surface.load(&prev, LoadMode::Editable)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Redo the last undone drawing action. Returns whether anything
    /// changed.
    pub fn redo(&mut self) -> ProofmarkResult<bool> {
        if !self.state.is_drawing_mode {
            return Ok(false);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };
        let current = surface.shapes()?;
        match self.history.redo(current) {
            Some(next) => {
                surface.load(&next, LoadMode::Editable)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ---- commit and persistence -----------------------------------------

    /// Commit the current drawing as a new annotation.
    ///
    /// Geometry is captured at this instant, converted to reference
    /// resolution and handed to the store. On success the drawing surface
    /// is cleared and drawing mode exits. On failure everything stays as it
    /// was — drawing mode active, geometry and history intact — so the
    /// user's work is not silently lost.
    #[tracing::instrument(skip(self, store))]
    pub fn save(
        &mut self,
        comment: Option<String>,
        store: &mut dyn AnnotationStore,
    ) -> ProofmarkResult<Annotation> {
        if !self.state.is_drawing_mode {
            return Err(ProofmarkError::validation(
                "save requires active drawing mode",
            ));
        }
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| ProofmarkError::surface("no drawing surface"))?;
        let shapes = surface.shapes()?;
        let draft = AnnotationDraft {
            timestamp_ms: self.state.current_time,
            comment,
            canvas_data: CanvasData {
                objects: to_reference(&shapes, surface.size()),
                brush_color: self.state.brush.color.clone(),
            },
        };

        let annotation = match store.create(&self.project_id, draft) {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(error = %e, "annotation save failed; keeping drawing state");
                return Err(e);
            }
        };

        self.annotations.push(annotation.clone());
        sort_by_timestamp(&mut self.annotations);
        self.state.is_drawing_mode = false;
        self.gesture.cancel();
        self.history.clear();
        self.recreate_surface();
        Ok(annotation)
    }

    /// Start an annotation load and return its epoch token.
    ///
    /// The hosting page calls this before firing its (asynchronous) list
    /// request and passes the token back to [`Player::apply_loaded`]; a
    /// result whose token is no longer current — because the player was
    /// disposed or a newer load started — is discarded rather than applied
    /// to a stale surface.
    pub fn begin_load(&mut self) -> u64 {
        self.load_epoch += 1;
        self.load_epoch
    }

    /// Apply the result of an annotation load started with
    /// [`Player::begin_load`].
    ///
    /// A failed list degrades to an empty annotation set: playback must
    /// never block on persistence.
    pub fn apply_loaded(
        &mut self,
        epoch: u64,
        result: ProofmarkResult<Vec<Annotation>>,
    ) -> ProofmarkResult<()> {
        if epoch != self.load_epoch {
            tracing::debug!(
                epoch,
                current = self.load_epoch,
                "discarding stale annotation list result"
            );
            return Ok(());
        }
        self.annotations = match result {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "annotation list failed; continuing with none");
                Vec::new()
            }
        };
        sort_by_timestamp(&mut self.annotations);
        Ok(())
    }

    /// Synchronous convenience over [`Player::begin_load`] +
    /// [`Player::apply_loaded`].
    pub fn refresh_annotations(&mut self, store: &dyn AnnotationStore) -> ProofmarkResult<()> {
        let epoch = self.begin_load();
        let result = store.list(&self.project_id);
        self.apply_loaded(epoch, result)
    }

    /// Delete an annotation everywhere: store, local list, markers, and —
    /// if it was active — the overlay.
    pub fn delete_annotation(
        &mut self,
        id: &str,
        store: &mut dyn AnnotationStore,
    ) -> ProofmarkResult<()> {
        store.delete(id)?;
        self.annotations.retain(|a| a.id != id);
        if self.state.active_annotation.as_deref() == Some(id) {
            self.state.active_annotation = None;
            self.active_since = None;
            self.sync.reset();
            if let Some(surface) = self.surface.as_mut() {
                surface.clear()?;
            }
        }
        Ok(())
    }

    // ---- timeline --------------------------------------------------------

    /// A seek-bar marker was clicked: seek there, pause, and load that
    /// annotation explicitly (an explicit click always wins — no threshold
    /// check).
    pub fn click_marker(&mut self, id: &str) -> ProofmarkResult<Vec<PlayerSignal>> {
        if self.state.is_drawing_mode {
            // Seeking is a playback affordance; disabled while drawing.
            return Ok(Vec::new());
        }
        let index = self
            .annotations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ProofmarkError::validation(format!("unknown annotation '{id}'")))?;

        let t = self.annotations[index].timestamp_ms;
        let mut signals = vec![PlayerSignal::RequestSeek(seek_seconds(t))];
        if self.state.is_playing {
            self.state.is_playing = false;
            signals.push(PlayerSignal::RequestPause);
            signals.push(PlayerSignal::PlayPauseChange(false));
        }
        self.state.current_time = t;
        self.sync.force_activate(id);
        self.state.active_annotation = Some(id.to_string());
        self.active_since = Some(t);
        self.load_annotation_geometry(index)?;
        signals.push(PlayerSignal::AnnotationClick(id.to_string()));
        signals.push(PlayerSignal::TimeUpdate(t));
        Ok(signals)
    }

    // ---- internals -------------------------------------------------------

    fn synchronize(&mut self) -> ProofmarkResult<()> {
        if let (Some(window), Some(since)) = (self.config.auto_clear, self.active_since)
            && self.state.is_playing
            && self.state.current_time.distance(since) >= window.0
        {
            // Display window elapsed: clear the overlay but keep the
            // synchronizer's active id so the same annotation is not
            // immediately re-rendered.
            if let Some(surface) = self.surface.as_mut() {
                surface.clear()?;
            }
            self.active_since = None;
        }

        let decision = self
            .sync
            .evaluate(self.state.current_time, &self.annotations);
        self.apply_decision(decision)
    }

    fn apply_decision(&mut self, decision: SyncDecision) -> ProofmarkResult<()> {
        match decision {
            SyncDecision::NoChange => {}
            SyncDecision::Clear => {
                self.state.active_annotation = None;
                self.active_since = None;
                if let Some(surface) = self.surface.as_mut() {
                    surface.clear()?;
                }
            }
            SyncDecision::Activate { id, index } => {
                self.state.active_annotation = Some(id);
                self.active_since = Some(self.state.current_time);
                self.load_annotation_geometry(index)?;
            }
        }
        Ok(())
    }

    fn load_annotation_geometry(&mut self, index: usize) -> ProofmarkResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let data = &self.annotations[index].canvas_data;
        if data.is_empty() {
            // Missing or empty geometry is "no drawing", not an error.
            surface.clear()?;
            return Ok(());
        }
        let local = from_reference(&data.objects, surface.size());
        surface.load(&local, LoadMode::Replay)
    }

    /// Dispose the current surface and acquire a fresh one of the same
    /// size. A failed re-acquisition degrades to "no overlay" (playback is
    /// never taken down by the annotation layer).
    fn recreate_surface(&mut self) {
        let Some(mut old) = self.surface.take() else {
            return;
        };
        let size = old.size();
        old.dispose();
        match self.factory.create(size) {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::warn!(error = %e, "surface recreate failed; overlay disabled");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/controller.rs"]
mod tests;
