// Capture module: camera acquisition, encoding and export of recordings

mod artifact;
mod error;
mod export;
mod format;
pub mod host;
mod pipeline;
pub mod synthetic;

pub use artifact::{Artifact, ArtifactInfo, ArtifactPayload, ObjectUrlRegistry};
pub use error::{AcquireError, CaptureError, ACCESS_DENIED_MESSAGE};
pub use export::{download_file_name, sanitize_file_name, DirectoryExporter};
pub use format::{select_format, MediaFormat, CODEC_PREFERENCES, WEBM_GENERIC};
pub use host::{
    encoder_channel, CaptureConstraints, ChunkStream, EncoderSession, EncoderSink, FileExporter,
    MediaEncoder, MediaSource, MediaSourceProvider, TrackInfo, TrackKind,
};
pub use pipeline::CapturePipeline;
