//! Small path and formatting helpers shared by the engine phases.

use crate::errors::{CoreError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Resolves the scan root to an absolute, canonical directory path.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = match path.canonicalize() {
        Ok(root) => root,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::missing_root(absolute_or_relaxed(path)));
        }
        Err(err) => return Err(CoreError::io(path, err)),
    };
    if !root.is_dir() {
        return Err(CoreError::not_a_directory(root));
    }
    Ok(root)
}

fn absolute_or_relaxed(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Number of path components separating `target` from `base`; `base` itself is 0.
///
/// Paths outside `base` are reported at depth 0.
pub fn depth_from(base: &Path, target: &Path) -> usize {
    target
        .strip_prefix(base)
        .map(|rel| rel.components().count())
        .unwrap_or(0)
}

/// Lower-cased extension of the final component, without the separator.
///
/// A leading dot does not start an extension and an empty extension is `None`.
pub fn lower_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Normalizes a user supplied extension: lower-case, one leading dot removed.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    ext.strip_prefix('.').unwrap_or(ext).to_lowercase()
}

/// Produces a short human readable duration.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let mins = secs / 60;
    let hours = mins / 60;
    let rem_secs = secs % 60;
    let rem_mins = mins % 60;

    if hours > 0 {
        format!("{hours}h {rem_mins:02}:{rem_secs:02}")
    } else if mins > 0 {
        format!("{mins}m {rem_secs:02}s")
    } else if secs > 0 {
        format!("{secs}s")
    } else {
        format!("{}ms", duration.as_millis())
    }
}
