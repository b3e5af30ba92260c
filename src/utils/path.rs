use std::path::{Path, PathBuf};

/// Get file extension as a lowercase string
pub fn get_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Check whether the path ends in one of the given extensions (case-insensitive)
pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[&str]) -> bool {
    match get_extension(path) {
        Some(ext) => extensions.iter().any(|candidate| candidate.eq_ignore_ascii_case(&ext)),
        None => false,
    }
}

/// Map a file under `source` to the same relative location under `destination`
pub fn rebase<P: AsRef<Path>>(path: P, source: &Path, destination: &Path) -> PathBuf {
    match path.as_ref().strip_prefix(source) {
        Ok(relative) => destination.join(relative),
        Err(_) => destination.join(path.as_ref().file_name().unwrap_or_default()),
    }
}
