// src/fs/browser.rs
//! Directory listing for the file-selection pane.

use std::fs;
use std::path::{Path, PathBuf};

use super::detection::{detect_file_type, FileCategory};

/// One directory entry: (name, is_dir, category, mime).
pub type Entry = (String, bool, FileCategory, String);

/// Load the entries of `dir`, directories first is not enforced; the
/// list is sorted alphabetically, case-insensitive. Unreadable
/// directories come back empty rather than failing the UI.
pub fn load_entries(dir: &Path) -> Vec<Entry> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut list: Vec<Entry> = read_dir
        .filter_map(Result::ok)
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let path = e.path();
            if path.is_dir() {
                (name, true, FileCategory::Other, String::new())
            } else {
                match detect_file_type(&path) {
                    Ok(ft) => (name, false, ft.category, ft.mime),
                    Err(_) => (name, false, FileCategory::Other, String::new()),
                }
            }
        })
        .collect();

    list.sort_by_key(|(n, _, _, _)| n.to_lowercase());
    list
}

/// The last `n` components of `path`, for compact pane titles.
pub fn tail_path(path: &PathBuf, n: usize) -> String {
    let components: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let start = components.len().saturating_sub(n);
    let tail = components[start..].join("/");
    if start > 0 { format!("…/{tail}") } else { tail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_path_keeps_the_last_components() {
        let p = PathBuf::from("/home/user/music/albums");
        assert_eq!(tail_path(&p, 2), "…/music/albums");
    }

    #[test]
    fn tail_path_short_paths_stay_whole() {
        let p = PathBuf::from("music");
        assert_eq!(tail_path(&p, 3), "music");
    }

    #[test]
    fn missing_directory_lists_empty() {
        assert!(load_entries(Path::new("/definitely/not/a/dir")).is_empty());
    }
}
