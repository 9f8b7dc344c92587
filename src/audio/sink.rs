//! Utilities for creating `rodio` sinks from in-memory sources.
//!
//! The helper here decodes a `MediaSource` and prepares a paused `Sink` at
//! the requested start position.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::bridge::MediaSource;

use super::types::MediaError;

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
///
/// Returns the sink together with the total duration when the decoder knows it.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    source: &MediaSource,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let decoder =
        Decoder::new(Cursor::new(source.bytes.clone())).map_err(|e| MediaError::Decode {
            mime: source.mime,
            reason: e.to_string(),
        })?;

    let total = decoder.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let decoded = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoded);
    sink.pause();
    Ok((sink, total))
}
