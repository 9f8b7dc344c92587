//! Application model: the playback/lyrics controller.
//!
//! `App` owns the track list, the transport state and the lyrics editor
//! state. It talks to the OS only through a `HostBridge` and plays audio
//! through the `MediaElement` it owns; both are injected so the controller
//! can be driven without a sound card or a display.

use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::audio::{MediaElement, MediaEvent, Subscription};
use crate::bridge::HostBridge;
use crate::config::LibrarySettings;
use crate::library::Track;

/// Message shown when the lyrics sidecar cannot be written.
pub const SAVE_FAILED_NOTICE: &str = "Failed to save lyrics";

/// Lyrics panel and editor state. Reset whenever a new track starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LyricsEditor {
    /// Text being edited; saved verbatim.
    pub draft: String,
    /// Whether the lyrics panel is shown next to the transport bar.
    pub visible: bool,
    /// Whether the editor overlay is open.
    pub editor_open: bool,
}

/// Scroll offset for a lyrics panel that can scroll by `scroll_range` lines,
/// proportional to playback progress.
///
/// Returns `None` while the duration is unknown, zero or not finite, or when
/// there is nothing to scroll.
pub fn lyrics_scroll_offset(position: f64, duration: Option<f64>, scroll_range: usize) -> Option<usize> {
    let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    if scroll_range == 0 {
        return None;
    }

    let mut progress = position / duration;
    if !progress.is_finite() {
        progress = 0.0;
    }
    let progress = progress.clamp(0.0, 1.0);
    Some(((progress * scroll_range as f64).floor() as usize).min(scroll_range))
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    /// Cursor in the track list.
    pub selected: usize,

    /// Index of the loaded track, if any.
    pub current: Option<usize>,
    pub playing: bool,
    /// Playback position in seconds.
    pub position: f64,
    /// Length of the loaded track in seconds, once known.
    pub duration: Option<f64>,

    pub lyrics: LyricsEditor,
    /// Blocking message for the user; cleared by `dismiss_notice`.
    pub notice: Option<String>,

    library: LibrarySettings,
    bridge: Box<dyn HostBridge>,
    media: Box<dyn MediaElement>,
    events: Subscription,
}

impl App {
    /// Create an empty `App` playing through `media` and reaching the OS through `bridge`.
    pub fn new(
        bridge: Box<dyn HostBridge>,
        media: Box<dyn MediaElement>,
        library: LibrarySettings,
    ) -> Self {
        let events = media.subscribe();
        Self {
            tracks: Vec::new(),
            selected: 0,
            current: None,
            playing: false,
            position: 0.0,
            duration: None,
            lyrics: LyricsEditor::default(),
            notice: None,
            library,
            bridge,
            media,
            events,
        }
    }

    /// The loaded track, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Seconds left in the loaded track (0 while unknown).
    pub fn remaining(&self) -> f64 {
        match self.duration {
            Some(d) if d.is_finite() => (d - self.position).max(0.0),
            _ => 0.0,
        }
    }

    /// Ask the user for files and append them to the library.
    ///
    /// Returns the number of tracks added; a cancelled dialog adds nothing.
    pub fn add_files(&mut self) -> usize {
        let paths = self.bridge.open_audio_files();
        if paths.is_empty() {
            debug!("no files selected");
            return 0;
        }
        self.import_paths(paths)
    }

    /// Read metadata for `paths` and append the resulting tracks in order.
    pub fn import_paths(&mut self, paths: Vec<PathBuf>) -> usize {
        let count = paths.len();
        for path in paths {
            let mut meta = self.bridge.read_metadata(&path);
            if self.library.prefer_sidecar_lyrics {
                if let Some(text) = self.bridge.read_sidecar_lyrics(&path) {
                    debug!("using sidecar lyrics for {}", path.display());
                    meta.lyrics = Some(text);
                }
            }
            self.tracks.push(Track::from_metadata(path, meta, &self.library));
        }
        if count > 0 {
            info!("imported {count} track(s), library now holds {}", self.tracks.len());
        }
        count
    }

    /// Load track `i` and start playing it.
    ///
    /// Out-of-range indices, unreadable files and undecodable audio are
    /// logged and leave the playback state as it was. A source that loads
    /// but refuses to start becomes the current track, paused.
    pub fn play_index(&mut self, i: usize) {
        let Some(track) = self.tracks.get(i) else {
            warn!("play_index({i}) ignored: library holds {} track(s)", self.tracks.len());
            return;
        };
        let path = track.path.clone();
        let tag_duration = track.duration;

        let source = match self.bridge.read_media(&path) {
            Ok(s) => s,
            Err(e) => {
                error!("play_index error: {e}");
                return;
            }
        };

        if let Err(e) = self.media.load(source) {
            error!("play_index error: cannot load {}: {e}", path.display());
            return;
        }

        // Settle whatever the previous source reported, plus the new duration.
        self.duration = None;
        self.pump_media_events();

        // The element now holds the new source, whether or not it starts.
        self.current = Some(i);
        self.selected = i;
        self.position = 0.0;
        if self.duration.is_none() {
            self.duration = tag_duration.filter(|d| d.is_finite() && *d > 0.0);
        }

        let lyrics = self.tracks[i].lyrics.clone().unwrap_or_default();
        self.lyrics.draft = lyrics;
        self.lyrics.editor_open = false;

        match self.media.play() {
            Ok(()) => {
                self.playing = true;
                info!("playing {}", path.display());
            }
            Err(e) => {
                self.playing = false;
                error!("play_index error: cannot start {}: {e}", path.display());
            }
        }
    }

    /// Play the track under the cursor.
    pub fn play_selected(&mut self) {
        if self.has_tracks() {
            self.play_index(self.selected);
        }
    }

    /// Pause or resume. Does nothing until a source has been loaded.
    pub fn toggle_play(&mut self) {
        if !self.media.has_source() {
            return;
        }
        if self.playing {
            self.media.pause();
            self.playing = false;
        } else {
            match self.media.play() {
                Ok(()) => self.playing = true,
                Err(e) => error!("play failed: {e}"),
            }
        }
    }

    /// Move the playback position to `value` seconds.
    pub fn seek(&mut self, value: f64) {
        if !self.media.has_source() {
            return;
        }
        self.position = self.media.seek(value);
    }

    /// Move the playback position by `delta` seconds.
    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.position + delta);
    }

    /// Jump to `fraction` (0..=1) of the track, when its length is known.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if let Some(d) = self.duration.filter(|d| d.is_finite() && *d > 0.0) {
            self.seek(d * fraction.clamp(0.0, 1.0));
        }
    }

    /// Write the draft to the current track's sidecar file.
    ///
    /// On success the track takes the draft as its lyrics, the editor closes
    /// and the panel stays visible. On failure the user gets a notice and
    /// the track keeps its lyrics.
    pub fn save_lyrics(&mut self) {
        let Some(i) = self.current.filter(|&i| i < self.tracks.len()) else {
            return;
        };

        let path = self.tracks[i].path.clone();
        if self.bridge.save_lyrics(&path, &self.lyrics.draft) {
            self.tracks[i].lyrics = Some(self.lyrics.draft.clone());
            self.lyrics.editor_open = false;
            self.lyrics.visible = true;
        } else {
            warn!("lyrics for {} were not saved", path.display());
            self.notice = Some(SAVE_FAILED_NOTICE.to_string());
        }
    }

    /// Open the editor on the current track's lyrics.
    pub fn open_lyrics_editor(&mut self) {
        let Some(track) = self.current_track() else {
            return;
        };
        self.lyrics.draft = track.lyrics.clone().unwrap_or_default();
        self.lyrics.editor_open = true;
    }

    /// Close the editor, keeping the draft as typed.
    pub fn close_lyrics_editor(&mut self) {
        self.lyrics.editor_open = false;
    }

    pub fn toggle_lyrics_visible(&mut self) {
        self.lyrics.visible = !self.lyrics.visible;
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.lyrics.draft.push(c);
    }

    pub fn push_draft_newline(&mut self) {
        self.lyrics.draft.push('\n');
    }

    pub fn pop_draft_char(&mut self) {
        self.lyrics.draft.pop();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Scroll offset for the lyrics panel, `None` when the panel is hidden
    /// or progress cannot be computed.
    pub fn lyrics_scroll(&self, scroll_range: usize) -> Option<usize> {
        if !self.lyrics.visible {
            return None;
        }
        lyrics_scroll_offset(self.position, self.duration, scroll_range)
    }

    /// Apply one event from the media element.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(secs) => {
                if secs.is_finite() {
                    self.position = secs.max(0.0);
                }
            }
            MediaEvent::DurationKnown(secs) => {
                self.duration = Some(secs).filter(|d| d.is_finite() && *d > 0.0);
            }
            MediaEvent::Ended => {
                self.playing = false;
            }
        }
    }

    /// Apply every event the media element published since the last call.
    pub fn pump_media_events(&mut self) {
        let pending: Vec<MediaEvent> = self.events.try_iter().collect();
        for event in pending {
            self.handle_media_event(event);
        }
    }

    /// Move the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if self.has_tracks() {
            self.selected = match self.selected {
                0 => self.tracks.len() - 1,
                n => (n - 1).min(self.tracks.len() - 1),
            };
        }
    }

    /// Stop playback and release the audio output.
    pub fn shutdown(&mut self) {
        self.playing = false;
        self.media.shutdown();
    }
}
