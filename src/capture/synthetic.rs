//! Synthetic capture host: a test-pattern camera and a chunking encoder.
//!
//! Used by the headless binary to exercise the whole pipeline without real
//! devices. The encoder output is a WebM-tagged byte stream with per-chunk
//! frame counters, not a playable video.

use super::error::{AcquireError, CaptureError};
use super::format::MediaFormat;
use super::host::{
    encoder_channel, CaptureConstraints, EncoderSession, EncoderSink, MediaEncoder, MediaSource,
    MediaSourceProvider, TrackInfo, TrackKind,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use crate::studio_constants::MIN_TICK_PERIOD;
use std::sync::Arc;
use std::time::Duration;

/// EBML magic that opens every WebM file
const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// Default interval between emitted chunks
pub const DEFAULT_TIMESLICE: Duration = Duration::from_millis(1000);

/// Frames represented by one chunk at 30 fps
const FRAMES_PER_SECOND: u64 = 30;

/// Source whose tracks are plain flags
#[derive(Debug)]
pub struct SyntheticSource {
    tracks: Mutex<Vec<TrackInfo>>,
}

impl SyntheticSource {
    fn new(constraints: &CaptureConstraints) -> Self {
        let mut tracks = vec![TrackInfo {
            kind: TrackKind::Video,
            label: format!("Test pattern {}x{}", constraints.width, constraints.height),
            live: true,
        }];
        if constraints.audio {
            tracks.push(TrackInfo {
                kind: TrackKind::Audio,
                label: "Silent tone".to_string(),
                live: true,
            });
        }
        Self {
            tracks: Mutex::new(tracks),
        }
    }
}

impl MediaSource for SyntheticSource {
    fn tracks(&self) -> Vec<TrackInfo> {
        self.tracks.lock().clone()
    }

    fn stop_all_tracks(&self) {
        for track in self.tracks.lock().iter_mut() {
            track.live = false;
        }
    }
}

/// Provider that always hands out a fresh test-pattern source
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticCameraProvider;

#[async_trait]
impl MediaSourceProvider for SyntheticCameraProvider {
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn MediaSource>, AcquireError> {
        if constraints.width == 0 || constraints.height == 0 {
            return Err(AcquireError::Device(format!(
                "unsupported resolution {}x{}",
                constraints.width, constraints.height
            )));
        }
        Ok(Arc::new(SyntheticSource::new(constraints)))
    }
}

/// Encoder that emits one chunk per timeslice on a tokio task
///
/// Must be started from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct SyntheticEncoder {
    supported: Vec<&'static str>,
    timeslice: Duration,
}

impl SyntheticEncoder {
    /// Timeslices shorter than `MIN_TICK_PERIOD` are raised to it
    pub fn new(timeslice: Duration) -> Self {
        Self {
            supported: vec![
                "video/webm;codecs=vp9,opus",
                "video/webm;codecs=vp8,opus",
                "video/webm",
            ],
            timeslice: timeslice.max(MIN_TICK_PERIOD),
        }
    }

    pub fn timeslice(&self) -> Duration {
        self.timeslice
    }

    /// Restrict the MIME types this encoder claims to support
    pub fn with_supported(mut self, supported: Vec<&'static str>) -> Self {
        self.supported = supported;
        self
    }
}

impl Default for SyntheticEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESLICE)
    }
}

impl MediaEncoder for SyntheticEncoder {
    fn is_type_supported(&self, mime_type: &str) -> bool {
        self.supported.contains(&mime_type)
    }

    fn start(
        &self,
        source: Arc<dyn MediaSource>,
        format: MediaFormat,
    ) -> Result<EncoderSession, CaptureError> {
        if !source.is_live() {
            return Err(CaptureError::EncoderStart(
                "capture source has no live tracks".to_string(),
            ));
        }
        let (session, sink) = encoder_channel();
        tokio::spawn(encode_loop(sink, source, format, self.timeslice));
        Ok(session)
    }
}

fn header_chunk(format: &MediaFormat) -> Vec<u8> {
    let mut chunk = EBML_MAGIC.to_vec();
    chunk.extend_from_slice(format.mime_type.as_bytes());
    chunk
}

fn frames_chunk(first_frame: u64, frames: u64) -> Vec<u8> {
    let mut chunk = Vec::with_capacity(16);
    chunk.extend_from_slice(&first_frame.to_le_bytes());
    chunk.extend_from_slice(&frames.to_le_bytes());
    chunk
}

async fn encode_loop(
    mut sink: EncoderSink,
    source: Arc<dyn MediaSource>,
    format: MediaFormat,
    timeslice: Duration,
) {
    let frames_per_slice = ((timeslice.as_secs_f64() * FRAMES_PER_SECOND as f64).round() as u64).max(1);
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + timeslice, timeslice);
    let mut next_frame = 0u64;
    let mut header = Some(header_chunk(&format));

    crate::debug!("Synthetic encoder running ({})", format.mime_type);
    loop {
        tokio::select! {
            _ = sink.stopped() => break,
            _ = ticker.tick() => {
                if !source.is_live() {
                    crate::warn!("Capture source went away, finalizing");
                    break;
                }
                let mut chunk = header.take().unwrap_or_default();
                chunk.extend(frames_chunk(next_frame, frames_per_slice));
                next_frame += frames_per_slice;
                if !sink.send(chunk) {
                    return;
                }
            }
        }
    }

    // Flush whatever was captured since the last timeslice
    let mut trailing = header.take().unwrap_or_default();
    trailing.extend(frames_chunk(next_frame, 1));
    sink.send(trailing);
    crate::debug!("Synthetic encoder finalized after {} frame(s)", next_frame + 1);
}

#[cfg(test)]
#[path = "synthetic_test.rs"]
mod tests;
