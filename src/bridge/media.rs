use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::error::BridgeError;

/// Audio bytes plus the MIME type they were read as.
///
/// The bytes are shared so the audio thread can rebuild its decoder (for
/// seeking) without copying the file again.
#[derive(Clone, Debug)]
pub struct MediaSource {
    pub bytes: Arc<[u8]>,
    pub mime: &'static str,
}

impl MediaSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime: &'static str) -> Self {
        Self {
            bytes: bytes.into(),
            mime,
        }
    }

    /// Read the file at `path` and tag it with the MIME type of its extension.
    pub fn read(path: &Path) -> Result<Self, BridgeError> {
        let data = fs::read(path).map_err(|source| BridgeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(data, mime_for_path(path)))
    }
}

/// MIME type for an audio file, by extension. Anything unrecognised is
/// treated as MPEG audio.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "m4a" | "mp4" => "audio/mp4",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "audio/mpeg",
    }
}
