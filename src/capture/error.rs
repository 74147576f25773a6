// Capture error types

/// Message shown when the camera or microphone cannot be opened
pub const ACCESS_DENIED_MESSAGE: &str =
    "Camera or Microphone access denied. Please enable permissions.";

/// Failures reported by a media source provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    /// The user or platform refused access
    #[error("Permission to use the camera or microphone was denied")]
    PermissionDenied,
    /// No matching capture device exists
    #[error("No camera or microphone found")]
    NoDevice,
    /// Any other device failure
    #[error("Capture device error: {0}")]
    Device(String),
}

/// Errors surfaced by the capture pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    /// Camera or microphone could not be acquired; retry with `acquire()`
    #[error("Camera or Microphone access denied. Please enable permissions.")]
    Acquisition(#[from] AcquireError),
    /// The encoder refused to start
    #[error("Failed to start encoder: {0}")]
    EncoderStart(String),
    /// The encoder finalized without producing any data
    #[error("Recording finished without any media data")]
    EmptyRecording,
    /// Download or dismiss requested with nothing pending
    #[error("No recording is waiting to be downloaded")]
    NoPendingArtifact,
    /// Saving the file failed; the recording stays pending
    #[error("Failed to save recording: {0}")]
    Export(String),
}

impl CaptureError {
    /// Whether retrying acquisition can clear this error
    pub fn is_retryable(&self) -> bool {
        matches!(self, CaptureError::Acquisition(_))
    }
}
