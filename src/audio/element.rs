use std::time::Duration;

use super::events::Subscription;
use super::types::MediaError;
use crate::bridge::MediaSource;

/// The single playback resource the controller owns.
///
/// Implementations report progress through `MediaEvent`s delivered to
/// subscribers; the controller never polls position directly.
pub trait MediaElement {
    /// Replace the current source. On error the previous source stays loaded.
    fn load(&mut self, source: MediaSource) -> Result<(), MediaError>;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    /// Jump to `secs`, clamped to the element's bounds. Returns the position
    /// actually applied.
    fn seek(&mut self, secs: f64) -> f64;

    fn has_source(&self) -> bool;

    fn subscribe(&self) -> Subscription;

    /// Stop playback and release the output. Further calls are no-ops.
    fn shutdown(&mut self) {}
}

/// Clamp a requested position to `[0, duration]` (or `[0, inf)` when the
/// duration is unknown). Non-finite requests map to 0.
pub fn clamp_position(secs: f64, duration: Option<f64>) -> f64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0.0;
    }
    match duration {
        Some(d) if d.is_finite() && d >= 0.0 => secs.min(d),
        _ => secs,
    }
}

/// Furthest offset a seek is sent to the audio thread with.
pub(crate) const MAX_SEEK_OFFSET: Duration = Duration::from_secs(u32::MAX as u64);

/// `clamp_position` plus the offset to hand to the decoder. Requests past
/// `MAX_SEEK_OFFSET` saturate there, so both values stay in sync.
pub(crate) fn seek_offset(secs: f64, duration: Option<f64>) -> (f64, Duration) {
    let to = clamp_position(secs, duration);
    match Duration::try_from_secs_f64(to) {
        Ok(offset) if offset <= MAX_SEEK_OFFSET => (to, offset),
        _ => (MAX_SEEK_OFFSET.as_secs_f64(), MAX_SEEK_OFFSET),
    }
}
