// src/audio/metadata.rs
//! Track metadata extraction using Lofty.

use std::path::PathBuf;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;

/// One metadata entry: raw tag key & value.
pub type TagEntry = (String, String);

/// Collected metadata for the current track.
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    /// Tag-frame key/value pairs from the primary tag.
    pub tags: Vec<TagEntry>,
    /// Audio properties (bitrate, sample rate, channels).
    pub properties: Vec<(String, String)>,
    /// Total track length in seconds.
    pub duration_secs: u64,
}

/// Load metadata for a file path without touching player state.
/// Safe to call from a background thread.
pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(&path)?.read()?;

    let mut tags = Vec::new();
    if let Some(tag) = tagged_file.primary_tag() {
        for item in tag.items() {
            tags.push((format!("{:?}", item.key()), format!("{:?}", item.value())));
        }
    }

    let props = tagged_file.properties();
    let mut properties = Vec::new();
    if let Some(b) = props.audio_bitrate() {
        properties.push(("Bitrate (kbps)".into(), b.to_string()));
    }
    if let Some(sr) = props.sample_rate() {
        properties.push(("Sample Rate (Hz)".into(), sr.to_string()));
    }
    if let Some(ch) = props.channels() {
        properties.push(("Channels".into(), ch.to_string()));
    }

    Ok(TrackMetadata {
        tags,
        properties,
        duration_secs: props.duration().as_secs(),
    })
}
