// src/audio/mod.rs
//! Audio module - playback transport, metadata, and the spectrum
//! analysis tap consumed by the visualizer.

pub mod analyser;
pub mod capture;
pub mod metadata;
pub mod player;

// Re-export commonly used types
pub use analyser::Analyser;
pub use capture::CaptureSource;
pub use metadata::{TagEntry, TrackMetadata};
pub use player::Player;
