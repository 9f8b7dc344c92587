//! Track model and helpers to turn paths into importable tracks.
//!
//! `model` holds the in-memory `Track`, `display` composes its list label
//! and `scan` expands command-line paths into audio files.

mod display;
mod model;
mod scan;

pub use model::Track;
pub use scan::expand_paths;

#[cfg(test)]
mod tests;
