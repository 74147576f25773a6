// Studio: single owner of session state, scroll engine, capture pipeline and config
//
// Every status transition is applied here, in order, before any side effect:
// the controller changes state, then scrolling and capture follow.

mod runtime;

pub use runtime::{spawn, StudioCommand, StudioHandle};

use crate::capture::{
    ArtifactInfo, CaptureConstraints, CaptureError, CapturePipeline, ChunkStream,
};
use crate::config::{ConfigEdit, ConfigError, PrompterConfig};
use crate::events::{
    current_timestamp, ArtifactDiscardedPayload, ArtifactReadyPayload, CaptureErrorPayload,
    CountdownPayload, DiscardReason, ScrollFramePayload, StatusChangedPayload,
    StudioEventEmitter,
};
use crate::recording::{CountdownTick, SessionController, SessionStateError, SessionStatus};
use crate::scroll::{OverlayStyle, ScrollEngine, ScrollLayout, ScrollTiming};
use crate::studio_constants::{
    COUNTDOWN_START, DEFAULT_REFRESH_HZ, MAX_REFRESH_HZ, TARGET_VIDEO_HEIGHT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::time::Instant;

/// Runtime options that are not part of the user-facing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioOptions {
    /// Display refresh rate driving the frame clock
    pub refresh_hz: f64,
    pub scroll_timing: ScrollTiming,
    pub countdown_seconds: u8,
    pub constraints: CaptureConstraints,
    /// Height of the prompter viewport in pixels
    pub viewport_height: f64,
}

impl Default for StudioOptions {
    fn default() -> Self {
        Self {
            refresh_hz: DEFAULT_REFRESH_HZ,
            scroll_timing: ScrollTiming::default(),
            countdown_seconds: COUNTDOWN_START,
            constraints: CaptureConstraints::default(),
            viewport_height: f64::from(TARGET_VIDEO_HEIGHT),
        }
    }
}

impl StudioOptions {
    /// Check that clock rates and the viewport are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate(self.refresh_hz)?;
        if let ScrollTiming::ElapsedTime { reference_hz } = self.scroll_timing {
            check_rate(reference_hz)?;
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ConfigError::InvalidViewportHeight(self.viewport_height));
        }
        Ok(())
    }
}

fn check_rate(hz: f64) -> Result<(), ConfigError> {
    if hz.is_finite() && hz > 0.0 && hz <= MAX_REFRESH_HZ {
        Ok(())
    } else {
        Err(ConfigError::InvalidRefreshRate {
            got: hz,
            max: MAX_REFRESH_HZ,
        })
    }
}

/// Errors returned by studio operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StudioError {
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Operation not allowed in the current status
    #[error("{0}")]
    Busy(&'static str),
    #[error("Studio runtime is no longer running")]
    RuntimeClosed,
}

/// Serializable view of the whole studio for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSnapshot {
    pub status: SessionStatus,
    pub countdown: Option<u8>,
    pub scroll_offset: f64,
    /// Offset to draw, including any reset transition in progress
    pub display_offset: f64,
    pub translate_y: f64,
    pub has_source: bool,
    pub capture_error: Option<String>,
    pub failed_attempts: u32,
    pub pending_artifact: Option<ArtifactInfo>,
    pub config: PrompterConfig,
    pub overlay: OverlayStyle,
}

/// Studio state owner
pub struct Studio<E: StudioEventEmitter> {
    controller: SessionController,
    scroll: ScrollEngine,
    pipeline: CapturePipeline,
    config: PrompterConfig,
    options: StudioOptions,
    emitter: E,
}

impl<E: StudioEventEmitter> Studio<E> {
    pub fn new(
        config: PrompterConfig,
        options: StudioOptions,
        pipeline: CapturePipeline,
        emitter: E,
    ) -> Self {
        Self {
            controller: SessionController::with_countdown(options.countdown_seconds),
            scroll: ScrollEngine::new(options.scroll_timing),
            pipeline: pipeline.with_constraints(options.constraints.clone()),
            config,
            options,
            emitter,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.controller.status()
    }

    pub fn config(&self) -> &PrompterConfig {
        &self.config
    }

    pub fn options(&self) -> &StudioOptions {
        &self.options
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    /// Acquire (or re-acquire) the camera source
    ///
    /// Only allowed while Idle; the source feeds the encoder otherwise.
    pub async fn acquire(&mut self) -> Result<(), StudioError> {
        if self.controller.status() != SessionStatus::Idle {
            return Err(StudioError::Busy(
                "Camera cannot be re-acquired during a recording",
            ));
        }
        if let Err(e) = self.pipeline.acquire().await {
            self.report(&e);
            return Err(e.into());
        }
        Ok(())
    }

    /// Begin the countdown; returns its starting value
    #[must_use = "this returns a Result that should be handled"]
    pub fn start_recording(&mut self) -> Result<u8, StudioError> {
        let remaining = self.controller.start_recording()?;
        self.emit_status();
        self.emitter.emit_countdown(CountdownPayload { remaining });
        Ok(remaining)
    }

    /// One countdown second elapsed
    ///
    /// When the countdown finishes, scrolling starts and the encoder is started
    /// in that order. The returned stream, if any, must be polled until it ends.
    pub fn tick_countdown(&mut self, now: Instant) -> Result<Option<ChunkStream>, StudioError> {
        match self.controller.tick_countdown()? {
            CountdownTick::Remaining(remaining) => {
                self.emitter.emit_countdown(CountdownPayload { remaining });
                Ok(None)
            }
            CountdownTick::Finished => {
                self.emit_status();
                self.scroll.set_scrolling(true, now);
                let stream = self.pipeline.on_recording_started();
                if stream.is_none() {
                    if let Some(e) = self.pipeline.error().cloned() {
                        self.report(&e);
                    }
                }
                Ok(stream)
            }
        }
    }

    /// Advance the scroll by one display refresh
    ///
    /// Returns the new offset, or None when not scrolling.
    pub fn on_frame(&mut self, now: Instant) -> Option<f64> {
        if !self.scroll.is_scrolling() {
            return None;
        }
        let offset = self.scroll.on_frame(&self.config, now);
        let layout = ScrollLayout::new(&self.config, self.options.viewport_height);
        self.emitter.emit_scroll_frame(ScrollFramePayload {
            offset,
            translate_y: layout.translate_y(offset),
        });
        Some(offset)
    }

    /// Stop recording
    ///
    /// Returns true when the encoder is finalizing and `on_encoder_finished`
    /// will follow. Otherwise the session is already back to Idle.
    #[must_use = "this returns a Result that should be handled"]
    pub fn stop_recording(&mut self, now: Instant) -> Result<bool, StudioError> {
        self.controller.stop_recording()?;
        self.emit_status();
        self.scroll.set_scrolling(false, now);

        let pending = self.pipeline.on_stopping();
        if !pending {
            self.controller.on_finished()?;
            self.emit_status();
        }
        Ok(pending)
    }

    /// Abandon a countdown in progress and return to Idle
    #[must_use = "this returns a Result that should be handled"]
    pub fn cancel_countdown(&mut self) -> Result<(), StudioError> {
        self.controller.abort()?;
        self.emit_status();
        Ok(())
    }

    /// Buffer one encoded chunk
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> bool {
        self.pipeline.push_chunk(chunk)
    }

    /// The encoder's chunk stream ended
    ///
    /// A stream that ends during Recording means the source went away; the
    /// session is stopped first so the usual Processing path applies.
    pub fn on_encoder_finished(&mut self, now: Instant) -> Result<Option<ArtifactInfo>, StudioError> {
        if self.controller.status() == SessionStatus::Recording {
            crate::warn!("Encoder ended while recording, stopping session");
            self.controller.stop_recording()?;
            self.emit_status();
            self.scroll.set_scrolling(false, now);
        }

        self.controller.begin_processing()?;
        self.emit_status();

        let artifact = match self.pipeline.finalize() {
            Ok(info) => {
                self.emitter.emit_artifact_ready(ArtifactReadyPayload {
                    artifact: info.clone(),
                });
                Some(info)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        };

        self.controller.on_finished()?;
        self.emit_status();
        Ok(artifact)
    }

    /// Apply one configuration edit
    ///
    /// Script and file name are locked unless Idle. A script change while not
    /// scrolling resets the offset.
    pub fn update_config(&mut self, edit: ConfigEdit, now: Instant) -> Result<(), StudioError> {
        if edit.locked_while_recording() && self.controller.status() != SessionStatus::Idle {
            return Err(StudioError::Busy(
                "Script and file name cannot be changed while recording",
            ));
        }
        let script_changed = matches!(edit, ConfigEdit::Script(_));
        edit.apply(&mut self.config)?;
        if script_changed {
            self.scroll.on_script_changed(now);
        }
        Ok(())
    }

    /// Save the pending artifact to disk
    pub async fn download(&mut self) -> Result<(ArtifactInfo, PathBuf), StudioError> {
        match self.pipeline.download(&self.config).await {
            Ok((info, path)) => {
                crate::info!("Recording saved to {}", path.display());
                self.emitter.emit_artifact_discarded(ArtifactDiscardedPayload {
                    artifact_id: info.id,
                    reason: DiscardReason::Downloaded,
                    saved_to: Some(path.display().to_string()),
                    timestamp: current_timestamp(),
                });
                Ok((info, path))
            }
            Err(e) => {
                if e != CaptureError::NoPendingArtifact {
                    self.report(&e);
                }
                Err(e.into())
            }
        }
    }

    /// Throw the pending artifact away
    pub fn dismiss(&mut self) -> Result<ArtifactInfo, StudioError> {
        let info = self.pipeline.dismiss()?;
        self.emitter.emit_artifact_discarded(ArtifactDiscardedPayload {
            artifact_id: info.id,
            reason: DiscardReason::Dismissed,
            saved_to: None,
            timestamp: current_timestamp(),
        });
        Ok(info)
    }

    /// Release everything regardless of status and return to Idle
    pub fn shutdown(&mut self, now: Instant) {
        let before = self.controller.status();
        self.scroll.set_scrolling(false, now);
        self.pipeline.teardown();

        let result = match before {
            SessionStatus::Idle => Ok(()),
            SessionStatus::Starting => self.controller.abort(),
            SessionStatus::Recording => self
                .controller
                .stop_recording()
                .and_then(|_| self.controller.on_finished()),
            SessionStatus::Stopping | SessionStatus::Processing => self.controller.on_finished(),
        };
        if let Err(e) = result {
            crate::error!("Failed to reset session during shutdown: {}", e);
        }
        if self.controller.status() != before {
            self.emit_status();
        }
        crate::info!("Studio shut down");
    }

    pub fn snapshot(&self, now: Instant) -> StudioSnapshot {
        let layout = ScrollLayout::new(&self.config, self.options.viewport_height);
        let display_offset = self.scroll.display_offset(now);
        StudioSnapshot {
            status: self.controller.status(),
            countdown: self.controller.countdown(),
            scroll_offset: self.scroll.offset(),
            display_offset,
            translate_y: layout.translate_y(display_offset),
            has_source: self.pipeline.has_source(),
            capture_error: self.pipeline.error().map(ToString::to_string),
            failed_attempts: self.pipeline.failed_attempts(),
            pending_artifact: self.pipeline.pending_artifact(),
            config: self.config.clone(),
            overlay: OverlayStyle::from_config(&self.config),
        }
    }

    fn emit_status(&self) {
        self.emitter.emit_status_changed(StatusChangedPayload {
            status: self.controller.status(),
            timestamp: current_timestamp(),
        });
    }

    fn report(&self, error: &CaptureError) {
        self.emitter.emit_capture_error(CaptureErrorPayload {
            message: error.to_string(),
            retryable: error.is_retryable(),
        });
    }
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
