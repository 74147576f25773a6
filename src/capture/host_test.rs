use super::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source with one video and one audio track
#[derive(Default)]
pub struct FakeSource {
    pub stopped: AtomicBool,
}

impl MediaSource for FakeSource {
    fn tracks(&self) -> Vec<TrackInfo> {
        let live = !self.stopped.load(Ordering::SeqCst);
        vec![
            TrackInfo {
                kind: TrackKind::Video,
                label: "fake camera".to_string(),
                live,
            },
            TrackInfo {
                kind: TrackKind::Audio,
                label: "fake microphone".to_string(),
                live,
            },
        ]
    }

    fn stop_all_tracks(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Provider that replays scripted outcomes, then succeeds
#[derive(Default)]
pub struct FakeProvider {
    pub outcomes: Mutex<VecDeque<AcquireError>>,
    pub calls: AtomicUsize,
    pub sources: Mutex<Vec<Arc<FakeSource>>>,
    pub last_constraints: Mutex<Option<CaptureConstraints>>,
}

impl FakeProvider {
    pub fn failing(errors: Vec<AcquireError>) -> Self {
        Self {
            outcomes: Mutex::new(errors.into()),
            ..Default::default()
        }
    }

    pub fn last_source(&self) -> Option<Arc<FakeSource>> {
        self.sources.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MediaSourceProvider for FakeProvider {
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaSource>, AcquireError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_constraints.lock().unwrap() = Some(constraints.clone());
        if let Some(err) = self.outcomes.lock().unwrap().pop_front() {
            return Err(err);
        }
        let source = Arc::new(FakeSource::default());
        self.sources.lock().unwrap().push(source.clone());
        Ok(source)
    }
}

/// Encoder whose chunks are pushed by the test through the stored sinks
pub struct FakeEncoder {
    pub supported: Vec<&'static str>,
    pub started: Mutex<Vec<MediaFormat>>,
    pub sinks: Mutex<Vec<EncoderSink>>,
    pub fail_start: AtomicBool,
}

impl FakeEncoder {
    pub fn supporting(supported: Vec<&'static str>) -> Self {
        Self {
            supported,
            started: Mutex::new(Vec::new()),
            sinks: Mutex::new(Vec::new()),
            fail_start: AtomicBool::new(false),
        }
    }

    /// Push a chunk through the most recent session
    pub fn emit(&self, chunk: &[u8]) -> bool {
        match self.sinks.lock().unwrap().last() {
            Some(sink) => sink.send(chunk.to_vec()),
            None => false,
        }
    }

    /// Finish the most recent session, ending its chunk stream
    pub fn finish(&self) {
        self.sinks.lock().unwrap().pop();
    }
}

impl Default for FakeEncoder {
    fn default() -> Self {
        Self::supporting(vec!["video/webm;codecs=vp9,opus", "video/webm"])
    }
}

impl MediaEncoder for FakeEncoder {
    fn is_type_supported(&self, mime_type: &str) -> bool {
        self.supported.contains(&mime_type)
    }

    fn start(
        &self,
        _source: Arc<dyn MediaSource>,
        format: MediaFormat,
    ) -> Result<EncoderSession, CaptureError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(CaptureError::EncoderStart("fake failure".to_string()));
        }
        self.started.lock().unwrap().push(format);
        let (session, sink) = encoder_channel();
        self.sinks.lock().unwrap().push(sink);
        Ok(session)
    }
}

/// Exporter that records saves in memory
#[derive(Default)]
pub struct FakeExporter {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl FileExporter for FakeExporter {
    async fn save(
        &self,
        payload: &ArtifactPayload,
        file_name: &str,
    ) -> Result<PathBuf, std::io::Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "disk is read-only",
            ));
        }
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), payload.data.clone()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

#[tokio::test]
async fn test_chunk_stream_ends_when_sink_dropped() {
    let (mut session, sink) = encoder_channel();
    let mut chunks = session.take_chunks().unwrap();
    assert!(session.take_chunks().is_none());

    assert!(sink.send(vec![1, 2]));
    drop(sink);

    assert_eq!(chunks.next().await, Some(vec![1, 2]));
    assert_eq!(chunks.next().await, None);
}

#[tokio::test]
async fn test_stop_signal_reaches_sink_once() {
    let (mut session, mut sink) = encoder_channel();
    assert!(session.stop());
    assert!(!session.stop());

    sink.stopped().await;
    // Already observed; resolves immediately again
    sink.stopped().await;
}

#[tokio::test]
async fn test_dropping_session_counts_as_stop() {
    let (session, mut sink) = encoder_channel();
    drop(session);
    sink.stopped().await;
    assert!(!sink.send(vec![0]));
}

#[test]
fn test_default_constraints_request_1080p_with_audio() {
    let constraints = CaptureConstraints::default();
    assert_eq!((constraints.width, constraints.height), (1920, 1080));
    assert!(constraints.audio);
}

#[test]
fn test_source_is_live_until_stopped() {
    let source = FakeSource::default();
    assert!(source.is_live());
    source.stop_all_tracks();
    assert!(!source.is_live());
}
