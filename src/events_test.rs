use super::*;
use std::sync::{Arc, Mutex};

/// Mock emitter that records all emitted events for testing
#[derive(Default, Clone)]
pub struct MockEventEmitter {
    pub status_events: Arc<Mutex<Vec<StatusChangedPayload>>>,
    pub countdown_events: Arc<Mutex<Vec<CountdownPayload>>>,
    pub scroll_events: Arc<Mutex<Vec<ScrollFramePayload>>>,
    pub error_events: Arc<Mutex<Vec<CaptureErrorPayload>>>,
    pub ready_events: Arc<Mutex<Vec<ArtifactReadyPayload>>>,
    pub discarded_events: Arc<Mutex<Vec<ArtifactDiscardedPayload>>>,
}

impl MockEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses in the order they were emitted
    pub fn statuses(&self) -> Vec<SessionStatus> {
        self.status_events
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.status)
            .collect()
    }

    pub fn countdowns(&self) -> Vec<u8> {
        self.countdown_events
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.remaining)
            .collect()
    }
}

impl StudioEventEmitter for MockEventEmitter {
    fn emit_status_changed(&self, payload: StatusChangedPayload) {
        self.status_events.lock().unwrap().push(payload);
    }

    fn emit_countdown(&self, payload: CountdownPayload) {
        self.countdown_events.lock().unwrap().push(payload);
    }

    fn emit_scroll_frame(&self, payload: ScrollFramePayload) {
        self.scroll_events.lock().unwrap().push(payload);
    }

    fn emit_capture_error(&self, payload: CaptureErrorPayload) {
        self.error_events.lock().unwrap().push(payload);
    }

    fn emit_artifact_ready(&self, payload: ArtifactReadyPayload) {
        self.ready_events.lock().unwrap().push(payload);
    }

    fn emit_artifact_discarded(&self, payload: ArtifactDiscardedPayload) {
        self.discarded_events.lock().unwrap().push(payload);
    }
}

#[test]
fn test_current_timestamp_is_rfc3339() {
    let ts = current_timestamp();
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
}

#[test]
fn test_status_payload_serializes_camel_case() {
    let payload = StatusChangedPayload {
        status: SessionStatus::Starting,
        timestamp: "2026-01-01T00:00:00+00:00".to_string(),
    };
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["status"], "starting");

    let frame = ScrollFramePayload {
        offset: 12.0,
        translate_y: -12.0,
    };
    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["translateY"], -12.0);
}

#[test]
fn test_discard_reason_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&DiscardReason::Dismissed).unwrap(),
        "\"dismissed\""
    );
}

#[test]
fn test_log_emitter_accepts_every_event() {
    // No logger installed: emission must still be a no-op rather than a panic
    let emitter = LogEventEmitter::new();
    emitter.emit_countdown(CountdownPayload { remaining: 2 });
    emitter.emit_capture_error(CaptureErrorPayload {
        message: "denied".to_string(),
        retryable: true,
    });
}
