use std::path::PathBuf;

use uuid::Uuid;

use crate::bridge::TrackMetadata;
use crate::config::LibrarySettings;

use super::display::display_from_fields;

/// One imported audio file.
#[derive(Clone, Debug)]
pub struct Track {
    /// Generated at import time; two imports of the same file get different ids.
    pub id: Uuid,
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub lyrics: Option<String>,
    /// Cover art bytes. Nothing extracts artwork yet, the bar renders a placeholder.
    pub artwork: Option<Vec<u8>>,
    /// Length in seconds as reported by the tag reader.
    pub duration: Option<f64>,
    pub display: String,
}

impl Track {
    /// Build a track for `path` out of the metadata the bridge returned.
    ///
    /// Blank titles or artists are replaced by the file name and "Unknown".
    pub fn from_metadata(path: PathBuf, meta: TrackMetadata, settings: &LibrarySettings) -> Self {
        let fallback = TrackMetadata::fallback(&path);
        let meta = TrackMetadata {
            title: if meta.title.trim().is_empty() {
                fallback.title
            } else {
                meta.title
            },
            artist: if meta.artist.trim().is_empty() {
                fallback.artist
            } else {
                meta.artist
            },
            ..meta
        };

        let display = display_from_fields(
            &path,
            &meta.title,
            &meta.artist,
            &settings.display_fields,
            &settings.display_separator,
        );

        Self {
            id: Uuid::new_v4(),
            path,
            title: meta.title,
            artist: meta.artist,
            lyrics: meta.lyrics,
            artwork: None,
            duration: meta.duration,
            display,
        }
    }
}
