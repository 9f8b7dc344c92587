//! Audio-related small types.
//!
//! Commands sent to the audio thread, events it publishes and the errors a
//! media element reports.

use std::sync::mpsc::Sender;
use std::time::Duration;

use thiserror::Error;

use crate::bridge::MediaSource;

/// Notifications published by a media element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MediaEvent {
    /// Current playback position in seconds.
    TimeUpdate(f64),
    /// The loaded source's length in seconds became known.
    DurationKnown(f64),
    /// Playback reached the end of the source.
    Ended,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("cannot decode {mime} source: {reason}")]
    Decode { mime: &'static str, reason: String },

    #[error("no source loaded")]
    NoSource,

    #[error("audio thread is not running")]
    Disconnected,
}

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Decode `source` and make it current (paused at 0). Replies with the
    /// decoded duration, if the container reports one.
    Load {
        source: MediaSource,
        reply: Sender<Result<Option<Duration>, MediaError>>,
    },
    /// Start or resume playback of the current source.
    Play,
    /// Pause playback.
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
