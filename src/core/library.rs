//! Directory scanner: audio files directly inside one folder (no recursion).

use std::path::{Path, PathBuf};

use super::error::Result;

pub fn scan_dir(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            out.push(path);
        }
    }

    out.sort();
    Ok(out)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
