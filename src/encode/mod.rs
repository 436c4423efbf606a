//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`crate::generate_animation`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Looping animated GIF sink.
pub mod gif;
/// Staged output files.
pub mod output;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
