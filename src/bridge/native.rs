use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::config::LibrarySettings;

use super::error::BridgeError;
use super::lyrics::{read_sidecar, write_sidecar};
use super::media::MediaSource;
use super::metadata::{TrackMetadata, read_metadata};
use super::HostBridge;

/// Bridge backed by the native file dialog, `lofty` and the local filesystem.
pub struct NativeBridge {
    extensions: Vec<String>,
}

impl NativeBridge {
    pub fn new(settings: &LibrarySettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }
}

impl HostBridge for NativeBridge {
    fn open_audio_files(&self) -> Vec<PathBuf> {
        debug!("opening file dialog");
        match rfd::FileDialog::new()
            .set_title("Add Music Files")
            .add_filter("Audio", self.extensions.as_slice())
            .pick_files()
        {
            Some(paths) => paths,
            None => {
                debug!("file dialog cancelled");
                Vec::new()
            }
        }
    }

    fn read_metadata(&self, path: &Path) -> TrackMetadata {
        read_metadata(path)
    }

    fn read_media(&self, path: &Path) -> Result<MediaSource, BridgeError> {
        let source = MediaSource::read(path).inspect_err(|e| error!("read media: {e}"))?;
        debug!(
            "read {} bytes as {} from {}",
            source.bytes.len(),
            source.mime,
            path.display()
        );
        Ok(source)
    }

    fn save_lyrics(&self, path: &Path, text: &str) -> bool {
        match write_sidecar(path, text) {
            Ok(target) => {
                info!("saved lyrics to {}", target.display());
                true
            }
            Err(e) => {
                error!("lyrics save error: {e}");
                false
            }
        }
    }

    fn read_sidecar_lyrics(&self, path: &Path) -> Option<String> {
        read_sidecar(path)
    }
}
