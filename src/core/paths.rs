//! Path normalization utilities
//!
//! Marker paths are always '/'-separated and relative to the job root, so the
//! same tree produces the same markers on every platform.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Path written into a marker for `path` under `root`.
///
/// Falls back to the normalized full path when `path` is not below `root`,
/// which only happens when the caller hands the annotator a foreign file.
pub fn marker_path(path: &Path, root: &Path) -> String {
    make_relative(path, root).unwrap_or_else(|| normalize_path(path))
}
