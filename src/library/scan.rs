use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// True when `path` has one of the configured audio extensions (case-insensitive).
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            found.push(path.to_path_buf());
        }
    }

    found.sort();
    found
}

/// Expand command-line `paths` into the audio files to import.
///
/// Files are kept in the given order (whatever their extension, the user
/// named them explicitly). Directories are walked according to `settings`
/// and contribute their audio files sorted by path. Missing paths are skipped.
pub fn expand_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in paths {
        if p.is_dir() {
            let found = scan_dir(p, settings);
            debug!("found {} audio file(s) under {}", found.len(), p.display());
            out.extend(found);
        } else if p.is_file() {
            out.push(p.clone());
        } else {
            warn!("skipping {}: no such file or directory", p.display());
        }
    }

    out
}
