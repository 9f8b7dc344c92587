//! Host bridge: the privileged operations the player needs from the OS.
//!
//! The controller never touches dialogs, tags or the filesystem directly; it
//! goes through `HostBridge`. `NativeBridge` is the real implementation,
//! tests substitute their own.

mod error;
mod lyrics;
mod media;
mod metadata;
mod native;

use std::path::{Path, PathBuf};

pub use error::BridgeError;
pub use media::MediaSource;
pub use metadata::TrackMetadata;
pub use native::NativeBridge;

/// Request/response operations across the bridge. Each call is one round
/// trip with no retries.
pub trait HostBridge {
    /// Ask the user for audio files. Cancelling yields an empty list.
    fn open_audio_files(&self) -> Vec<PathBuf>;

    /// Read title/artist/lyrics for `path`. Never fails: unreadable tags
    /// degrade to the file name and "Unknown".
    fn read_metadata(&self, path: &Path) -> TrackMetadata;

    /// Load the whole file into a playable, self-contained source.
    fn read_media(&self, path: &Path) -> Result<MediaSource, BridgeError>;

    /// Write `text` to the `<path>.txt` sidecar. Returns `false` on failure.
    fn save_lyrics(&self, path: &Path, text: &str) -> bool;

    /// Contents of the `<path>.txt` sidecar, if there is one.
    fn read_sidecar_lyrics(&self, path: &Path) -> Option<String>;
}

#[cfg(test)]
mod tests;
