use crate::foundation::core::TimeMs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Events from the hosting page's video element.
///
/// The video element is the sole source of asynchronous timing in the core;
/// everything downstream of these events runs synchronously inside the
/// handler.
pub enum MediaEvent {
    /// Media metadata is available. The hosting container is typically not
    /// measurable before this point, which is why surface creation is
    /// deferred to the first [`container_resized`] after it.
    ///
    /// [`container_resized`]: crate::player::controller::Player::container_resized
    LoadedMetadata {
        /// Total media duration.
        duration: TimeMs,
    },
    /// Enough data to start playback; hosts usually re-measure here.
    CanPlay,
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// Playback position advanced.
    TimeUpdate(TimeMs),
    /// A seek completed.
    Seeked(TimeMs),
}

#[derive(Clone, Debug, PartialEq)]
/// Outputs from the player to the hosting page.
///
/// `Request*` variants are commands the host must apply to the video
/// element (the engine never touches it directly); the rest are state
/// notifications the host forwards to its callbacks.
pub enum PlayerSignal {
    /// Playback position changed (forward of `onTimeUpdate`).
    TimeUpdate(TimeMs),
    /// Media duration became known (forward of `onDurationChange`).
    DurationChange(TimeMs),
    /// Play/pause state changed (forward of `onPlayPauseChange`).
    PlayPauseChange(bool),
    /// Start playback of the video element.
    RequestPlay,
    /// Pause the video element, synchronously.
    RequestPause,
    /// Seek the video element to this many seconds.
    RequestSeek(f64),
    /// A timeline marker was clicked (forward of `onAnnotationClick`).
    AnnotationClick(String),
}
