// Studio events for presentation-layer notification
// Defines event payloads and emission trait for testability

use serde::Serialize;
use uuid::Uuid;

use crate::capture::ArtifactInfo;
use crate::recording::SessionStatus;

/// Event names as constants for consistency
pub mod event_names {
    pub const STATUS_CHANGED: &str = "status_changed";
    pub const COUNTDOWN: &str = "countdown";
    pub const SCROLL_FRAME: &str = "scroll_frame";
    pub const CAPTURE_ERROR: &str = "capture_error";
    pub const ARTIFACT_READY: &str = "artifact_ready";
    pub const ARTIFACT_DISCARDED: &str = "artifact_discarded";
}

/// Payload for status_changed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangedPayload {
    /// New session status
    pub status: SessionStatus,
    /// ISO 8601 timestamp of the transition
    pub timestamp: String,
}

/// Payload for countdown event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountdownPayload {
    /// Seconds left before recording begins
    pub remaining: u8,
}

/// Payload for scroll_frame event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollFramePayload {
    /// Logical scroll offset in pixels
    pub offset: f64,
    /// Vertical transform to apply to the script content
    pub translate_y: f64,
}

/// Payload for capture_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureErrorPayload {
    /// User-facing error message
    pub message: String,
    /// Whether the user can fix this by retrying acquisition
    pub retryable: bool,
}

/// Payload for artifact_ready event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtifactReadyPayload {
    pub artifact: ArtifactInfo,
}

/// Why a pending artifact went away
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscardReason {
    Downloaded,
    Dismissed,
}

/// Payload for artifact_discarded event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDiscardedPayload {
    pub artifact_id: Uuid,
    pub reason: DiscardReason,
    /// Where the file was saved, for downloads
    pub saved_to: Option<String>,
    /// ISO 8601 timestamp when the artifact was discarded
    pub timestamp: String,
}

/// Trait for emitting studio events
/// Allows mocking in tests while using a logging emitter in production
pub trait StudioEventEmitter: Send + Sync {
    /// Emit status_changed event
    fn emit_status_changed(&self, payload: StatusChangedPayload);

    /// Emit countdown event
    fn emit_countdown(&self, payload: CountdownPayload);

    /// Emit scroll_frame event
    fn emit_scroll_frame(&self, payload: ScrollFramePayload);

    /// Emit capture_error event
    fn emit_capture_error(&self, payload: CaptureErrorPayload);

    /// Emit artifact_ready event
    fn emit_artifact_ready(&self, payload: ArtifactReadyPayload);

    /// Emit artifact_discarded event
    fn emit_artifact_discarded(&self, payload: ArtifactDiscardedPayload);
}

/// Emitter that writes every event to the log as JSON
///
/// Scroll frames arrive at the refresh rate, so they are logged at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventEmitter;

impl LogEventEmitter {
    pub fn new() -> Self {
        Self
    }

    fn log<P: Serialize>(&self, level: log::Level, event: &str, payload: &P) {
        match serde_json::to_string(payload) {
            Ok(json) => log::log!(level, "event {} {}", event, json),
            Err(e) => crate::warn!("Failed to serialize event '{}': {}", event, e),
        }
    }
}

impl StudioEventEmitter for LogEventEmitter {
    fn emit_status_changed(&self, payload: StatusChangedPayload) {
        self.log(log::Level::Info, event_names::STATUS_CHANGED, &payload);
    }

    fn emit_countdown(&self, payload: CountdownPayload) {
        self.log(log::Level::Info, event_names::COUNTDOWN, &payload);
    }

    fn emit_scroll_frame(&self, payload: ScrollFramePayload) {
        self.log(log::Level::Trace, event_names::SCROLL_FRAME, &payload);
    }

    fn emit_capture_error(&self, payload: CaptureErrorPayload) {
        self.log(log::Level::Warn, event_names::CAPTURE_ERROR, &payload);
    }

    fn emit_artifact_ready(&self, payload: ArtifactReadyPayload) {
        self.log(log::Level::Info, event_names::ARTIFACT_READY, &payload);
    }

    fn emit_artifact_discarded(&self, payload: ArtifactDiscardedPayload) {
        self.log(log::Level::Info, event_names::ARTIFACT_DISCARDED, &payload);
    }
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
