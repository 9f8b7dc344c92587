//! `<audio file>.txt` sidecar files holding plain-text lyrics.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::BridgeError;

/// `/music/song.mp3` -> `/music/song.mp3.txt`. The suffix is appended, the
/// audio extension is kept.
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(".txt");
    PathBuf::from(s)
}

/// Overwrite the sidecar of `path` with `text`, verbatim.
pub fn write_sidecar(path: &Path, text: &str) -> Result<PathBuf, BridgeError> {
    let target = sidecar_path(path);
    fs::write(&target, text).map_err(|source| BridgeError::Write {
        path: target.clone(),
        source,
    })?;
    Ok(target)
}

/// Read the sidecar of `path`; `None` when missing or not UTF-8.
pub fn read_sidecar(path: &Path) -> Option<String> {
    fs::read_to_string(sidecar_path(path)).ok()
}
