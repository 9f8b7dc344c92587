//! Audio playback: the media element the controller owns.
//!
//! `element` defines the `MediaElement` seam, `player` implements it on top
//! of a dedicated audio thread driving `rodio`, and `events` carries
//! time/duration/ended notifications back to the UI thread.

mod element;
mod events;
mod player;
mod sink;
mod thread;
mod types;

pub use element::MediaElement;
pub use events::Subscription;
#[cfg(test)]
pub use element::clamp_position;
#[cfg(test)]
pub use events::EventHub;
pub use player::RodioElement;
pub use types::*;
