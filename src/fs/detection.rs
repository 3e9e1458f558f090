// src/fs/detection.rs
//! File type detection: magic-number sniffing with an extension-based
//! fallback, narrowed to what the player cares about.

use std::{fmt, path::Path};

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// High-level file categories for the browser pane.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    /// Playable audio.
    Audio,
    /// Anything else.
    Other,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileCategory::Audio => write!(f, "Audio"),
            FileCategory::Other => write!(f, "Other"),
        }
    }
}

/// A detected MIME type with its category.
#[derive(Debug)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    // Magic numbers first; they catch misnamed files.
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let mime = kind.mime_type().to_string();
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            _ => FileCategory::Other,
        };
        return Ok(FileType { mime, category });
    }

    // Fall back to the extension.
    let mime = MimeGuess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    let category = if mime.starts_with("audio/") {
        FileCategory::Audio
    } else {
        FileCategory::Other
    };

    Ok(FileType { mime, category })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn extension_fallback_spots_audio() {
        let path = temp_file("ridgeline-detect-test.mp3");
        let ft = detect_file_type(&path).unwrap();
        assert_eq!(ft.category, FileCategory::Audio);
        assert_eq!(ft.mime, "audio/mpeg");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unknown_extensions_are_other() {
        let path = temp_file("ridgeline-detect-test.xyz");
        let ft = detect_file_type(&path).unwrap();
        assert_eq!(ft.category, FileCategory::Other);
        std::fs::remove_file(path).ok();
    }
}
