// Capture pipeline: bridges camera acquisition and encoded-chunk buffering
// to a finished, downloadable recording

use super::artifact::{Artifact, ArtifactInfo, ObjectUrlRegistry};
use super::error::CaptureError;
use super::export::download_file_name;
use super::format::{select_format, MediaFormat};
use super::host::{
    CaptureConstraints, ChunkStream, EncoderSession, FileExporter, MediaEncoder, MediaSource,
    MediaSourceProvider,
};
use crate::config::PrompterConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Pipeline state for one studio
///
/// Owns the acquired source, the active encoder session, the media buffer and
/// at most one pending artifact.
pub struct CapturePipeline {
    provider: Arc<dyn MediaSourceProvider>,
    encoder: Arc<dyn MediaEncoder>,
    exporter: Arc<dyn FileExporter>,
    urls: ObjectUrlRegistry,
    constraints: CaptureConstraints,
    source: Option<Arc<dyn MediaSource>>,
    error: Option<CaptureError>,
    failed_attempts: u32,
    session: Option<EncoderSession>,
    format: Option<MediaFormat>,
    buffer: Vec<Vec<u8>>,
    finalizing: bool,
    pending: Option<Artifact>,
}

impl CapturePipeline {
    pub fn new(
        provider: Arc<dyn MediaSourceProvider>,
        encoder: Arc<dyn MediaEncoder>,
        exporter: Arc<dyn FileExporter>,
    ) -> Self {
        Self {
            provider,
            encoder,
            exporter,
            urls: ObjectUrlRegistry::new(),
            constraints: CaptureConstraints::default(),
            source: None,
            error: None,
            failed_attempts: 0,
            session: None,
            format: None,
            buffer: Vec::new(),
            finalizing: false,
            pending: None,
        }
    }

    /// Use custom acquisition constraints
    pub fn with_constraints(mut self, constraints: CaptureConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Acquire the camera/microphone source
    ///
    /// Any previous source is released first so a retry always starts clean.
    /// On failure the error is recorded for the UI and no source remains.
    pub async fn acquire(&mut self) -> Result<(), CaptureError> {
        self.release_source();
        crate::debug!(
            "Requesting capture source {}x{} (audio: {})",
            self.constraints.width,
            self.constraints.height,
            self.constraints.audio
        );
        match self.provider.acquire(&self.constraints).await {
            Ok(source) => {
                crate::info!(
                    "Capture source acquired with {} track(s)",
                    source.tracks().len()
                );
                self.source = Some(source);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.failed_attempts += 1;
                crate::warn!(
                    "Camera error (attempt {} failed): {}",
                    self.failed_attempts,
                    e
                );
                let err = CaptureError::from(e);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Recording began: reset the buffer and start the encoder
    ///
    /// Returns the chunk stream to poll, or None when nothing will be captured
    /// (no source, or the encoder failed to start; the latter is recorded as
    /// the current error).
    pub fn on_recording_started(&mut self) -> Option<ChunkStream> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => {
                crate::warn!("Recording without a capture source; nothing will be saved");
                return None;
            }
        };

        self.buffer.clear();
        self.discard_pending();

        let encoder = self.encoder.clone();
        let format = select_format(|mime| encoder.is_type_supported(mime));
        crate::info!("Starting encoder with {}", format.mime_type);

        match self.encoder.start(source, format) {
            Ok(mut session) => {
                let chunks = session.take_chunks();
                self.session = Some(session);
                self.format = Some(format);
                self.finalizing = false;
                chunks
            }
            Err(e) => {
                crate::error!("Encoder failed to start: {}", e);
                self.error = Some(e);
                None
            }
        }
    }

    /// Append an encoded chunk; empty chunks are ignored
    pub fn push_chunk(&mut self, chunk: Vec<u8>) -> bool {
        if chunk.is_empty() {
            return false;
        }
        crate::trace!("Buffered chunk of {} bytes", chunk.len());
        self.buffer.push(chunk);
        true
    }

    /// Recording is stopping: ask the encoder to finalize
    ///
    /// Returns true when finalization is pending and `finalize()` will follow
    /// once the chunk stream ends.
    pub fn on_stopping(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.stop();
                self.finalizing = true;
                crate::debug!("Encoder stop requested, waiting for trailing data");
                true
            }
            None => false,
        }
    }

    /// Whether the encoder was asked to stop and has not finished yet
    pub fn is_finalizing(&self) -> bool {
        self.finalizing
    }

    /// The chunk stream ended: assemble the pending artifact
    ///
    /// # Errors
    /// `EmptyRecording` if no data was buffered; the error is also recorded.
    pub fn finalize(&mut self) -> Result<ArtifactInfo, CaptureError> {
        self.session = None;
        self.finalizing = false;

        if self.buffer.is_empty() {
            crate::warn!("Encoder finalized without any data");
            self.error = Some(CaptureError::EmptyRecording);
            return Err(CaptureError::EmptyRecording);
        }

        let format = self.format.unwrap_or(super::format::WEBM_GENERIC);
        let chunks = std::mem::take(&mut self.buffer);
        self.discard_pending();
        let artifact = Artifact::assemble(chunks, format.container, format.extension, &self.urls);
        let info = artifact.info();
        crate::info!(
            "Recording assembled: {} bytes from {} chunk(s)",
            info.size_bytes,
            info.chunk_count
        );
        self.pending = Some(artifact);
        Ok(info)
    }

    /// Save the pending artifact using the configured file name
    ///
    /// The object URL is revoked only after the save has gone through. On
    /// failure the artifact stays pending so the user can try again.
    pub async fn download(
        &mut self,
        config: &PrompterConfig,
    ) -> Result<(ArtifactInfo, PathBuf), CaptureError> {
        let (url, info) = match &self.pending {
            Some(artifact) => (artifact.url().to_string(), artifact.info()),
            None => return Err(CaptureError::NoPendingArtifact),
        };
        let payload = self
            .urls
            .resolve(&url)
            .ok_or(CaptureError::NoPendingArtifact)?;
        let file_name = download_file_name(config, &payload.extension);

        match self.exporter.save(&payload, &file_name).await {
            Ok(path) => {
                self.pending = None;
                self.urls.revoke(&url);
                Ok((info, path))
            }
            Err(e) => {
                crate::error!("Failed to save {}: {}", file_name, e);
                let err = CaptureError::Export(e.to_string());
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Drop the pending artifact without saving
    pub fn dismiss(&mut self) -> Result<ArtifactInfo, CaptureError> {
        self.discard_pending().ok_or(CaptureError::NoPendingArtifact)
    }

    /// Stop everything: encoder session and every source track
    pub fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        self.finalizing = false;
        self.release_source();
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn error(&self) -> Option<&CaptureError> {
        self.error.as_ref()
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn buffered_chunks(&self) -> usize {
        self.buffer.len()
    }

    pub fn pending_artifact(&self) -> Option<ArtifactInfo> {
        self.pending.as_ref().map(Artifact::info)
    }

    /// Format chosen for the current or last recording
    pub fn selected_format(&self) -> Option<MediaFormat> {
        self.format
    }

    /// Object URL registry, for resolving a pending artifact's URL
    pub fn urls(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    fn discard_pending(&mut self) -> Option<ArtifactInfo> {
        let artifact = self.pending.take()?;
        self.urls.revoke(artifact.url());
        Some(artifact.info())
    }

    fn release_source(&mut self) {
        if let Some(source) = self.source.take() {
            source.stop_all_tracks();
            crate::debug!("Capture source released");
        }
    }
}

impl Drop for CapturePipeline {
    /// Release camera and microphone when the pipeline goes away
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
