// Recording format negotiation

use serde::Serialize;

/// An encoder output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFormat {
    /// Full MIME type including codecs, as passed to the encoder
    pub mime_type: &'static str,
    /// Container MIME type of the finished file
    pub container: &'static str,
    /// File extension for downloads
    pub extension: &'static str,
}

/// VP9 video with Opus audio
pub const WEBM_VP9_OPUS: MediaFormat = MediaFormat {
    mime_type: "video/webm;codecs=vp9,opus",
    container: "video/webm",
    extension: "webm",
};

/// VP8 video with Opus audio
pub const WEBM_VP8_OPUS: MediaFormat = MediaFormat {
    mime_type: "video/webm;codecs=vp8,opus",
    container: "video/webm",
    extension: "webm",
};

/// Plain WebM with encoder-chosen codecs
pub const WEBM_GENERIC: MediaFormat = MediaFormat {
    mime_type: "video/webm",
    container: "video/webm",
    extension: "webm",
};

/// Formats probed in order; the first supported one wins
pub const CODEC_PREFERENCES: [MediaFormat; 3] = [WEBM_VP9_OPUS, WEBM_VP8_OPUS, WEBM_GENERIC];

/// Pick the recording format for an encoder
///
/// Probes `CODEC_PREFERENCES` in order. The generic container is the last
/// resort and is returned even if the encoder does not claim to support it.
pub fn select_format<F>(is_supported: F) -> MediaFormat
where
    F: Fn(&str) -> bool,
{
    CODEC_PREFERENCES
        .iter()
        .copied()
        .find(|format| is_supported(format.mime_type))
        .unwrap_or(WEBM_GENERIC)
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
