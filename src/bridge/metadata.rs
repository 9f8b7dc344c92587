use std::path::Path;

use log::debug;
use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};

/// Artist shown when the file carries none.
pub const UNKNOWN_ARTIST: &str = "Unknown";

/// What the tag reader could tell about a file.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub lyrics: Option<String>,
    pub duration: Option<f64>,
}

impl TrackMetadata {
    /// The values used when nothing can be read: file name and "Unknown".
    pub fn fallback(path: &Path) -> Self {
        Self {
            title: file_name(path),
            artist: UNKNOWN_ARTIST.to_string(),
            lyrics: None,
            duration: None,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

fn non_blank(v: &str) -> Option<String> {
    let v = v.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Read title, artist, lyrics and duration from the tags of `path`.
///
/// Extraction errors are swallowed: the result then carries the fallback
/// title/artist and no lyrics. Multiple lyrics frames are joined with `\n`.
pub fn read_metadata(path: &Path) -> TrackMetadata {
    let mut meta = TrackMetadata::fallback(path);

    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!("no readable tags in {}: {e}", path.display());
            return meta;
        }
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        meta.duration = Some(duration.as_secs_f64());
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(ItemKey::TrackTitle).and_then(non_blank) {
            meta.title = v;
        }
        if let Some(v) = tag.get_string(ItemKey::TrackArtist).and_then(non_blank) {
            meta.artist = v;
        }

        let lyrics: Vec<&str> = tag.get_strings(ItemKey::Lyrics).collect();
        if !lyrics.is_empty() {
            let joined = lyrics.join("\n");
            if !joined.trim().is_empty() {
                meta.lyrics = Some(joined);
            }
        }
    }

    meta
}
