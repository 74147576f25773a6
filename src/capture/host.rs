//! Host capability traits for camera, encoder and file export.
//!
//! These traits decouple the capture pipeline from any concrete platform so
//! it can be driven by real devices, the synthetic test-pattern host, or
//! fakes in tests.

use super::error::{AcquireError, CaptureError};
use super::format::MediaFormat;
use super::ArtifactPayload;
use crate::studio_constants::{TARGET_VIDEO_HEIGHT, TARGET_VIDEO_WIDTH};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Constraints passed to the source provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: TARGET_VIDEO_WIDTH,
            height: TARGET_VIDEO_HEIGHT,
            audio: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

/// Description of one track of an acquired source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub kind: TrackKind,
    pub label: String,
    /// False once the track has been stopped
    pub live: bool,
}

/// A live camera/microphone source
pub trait MediaSource: Send + Sync {
    /// Current state of every track
    fn tracks(&self) -> Vec<TrackInfo>;

    /// Stop every track, releasing the underlying devices
    fn stop_all_tracks(&self);

    fn is_live(&self) -> bool {
        self.tracks().iter().any(|t| t.live)
    }
}

/// Provider of camera/microphone sources
#[async_trait]
pub trait MediaSourceProvider: Send + Sync {
    /// Request a combined audio/video source
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaSource>, AcquireError>;
}

/// Encoder that turns a source into a stream of encoded chunks
pub trait MediaEncoder: Send + Sync {
    /// Whether the encoder can produce this MIME type
    fn is_type_supported(&self, mime_type: &str) -> bool;

    /// Begin encoding `source` in `format`
    fn start(
        &self,
        source: Arc<dyn MediaSource>,
        format: MediaFormat,
    ) -> Result<EncoderSession, CaptureError>;
}

/// Host-level save-as-file facility
#[async_trait]
pub trait FileExporter: Send + Sync {
    /// Save the payload under the suggested file name; returns where it went
    async fn save(
        &self,
        payload: &ArtifactPayload,
        file_name: &str,
    ) -> Result<PathBuf, std::io::Error>;
}

/// Create a connected encoder session/sink pair
///
/// The pipeline keeps the session; the encoder implementation keeps the sink
/// and drops it once finalization is complete, which ends the chunk stream.
pub fn encoder_channel() -> (EncoderSession, EncoderSink) {
    let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = oneshot::channel();
    (
        EncoderSession {
            chunks: Some(ChunkStream { rx: chunk_rx }),
            stop: Some(stop_tx),
        },
        EncoderSink {
            chunks: chunk_tx,
            stop: stop_rx,
            stop_seen: false,
        },
    )
}

/// Pipeline-side handle on a running encoder
#[derive(Debug)]
pub struct EncoderSession {
    chunks: Option<ChunkStream>,
    stop: Option<oneshot::Sender<()>>,
}

impl EncoderSession {
    /// Take the chunk stream; available once
    pub fn take_chunks(&mut self) -> Option<ChunkStream> {
        self.chunks.take()
    }

    /// Ask the encoder to finalize
    ///
    /// Returns false if the stop signal was already sent. Dropping the session
    /// has the same effect.
    pub fn stop(&mut self) -> bool {
        match self.stop.take() {
            Some(tx) => {
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }
}

/// Ordered stream of encoded chunks; ends when the encoder finalizes
#[derive(Debug)]
pub struct ChunkStream {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl ChunkStream {
    /// Next chunk, or None once finalization is complete
    pub async fn next(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }
}

/// Encoder-side end of a session
#[derive(Debug)]
pub struct EncoderSink {
    chunks: mpsc::UnboundedSender<Vec<u8>>,
    stop: oneshot::Receiver<()>,
    stop_seen: bool,
}

impl EncoderSink {
    /// Deliver a chunk; returns false if the pipeline is gone
    pub fn send(&self, chunk: Vec<u8>) -> bool {
        self.chunks.send(chunk).is_ok()
    }

    /// Resolves once the pipeline asked for finalization or dropped the session
    ///
    /// Cancel-safe, so it can sit in a `select!` loop.
    pub async fn stopped(&mut self) {
        if self.stop_seen {
            return;
        }
        let _ = (&mut self.stop).await;
        self.stop_seen = true;
    }
}

#[cfg(test)]
#[path = "host_test.rs"]
pub(crate) mod tests;
