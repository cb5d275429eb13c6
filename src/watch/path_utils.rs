// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
/// - Only if both attempts fail do we give up.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(rel.to_string_lossy().replace('\\', "/"));
    }

    // Notably macOS reports /private/var/... for paths under /var/...
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(rel.to_string_lossy().replace('\\', "/"));
        }
    }

    None
}

/// Human-readable form of `path` for progress output: relative to `root`
/// when possible, otherwise the full path.
pub fn display_path(root: &Path, path: &Path) -> String {
    relative_str(root, path).unwrap_or_else(|| path.display().to_string())
}
