//! Post-deletion sweep of empty directories.

use crate::fs::{FileSystem, RealFileSystem};
use crate::helpers::depth_from;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Removes directories under a root that are empty, deepest first.
///
/// The root itself is never removed. Emptiness is checked at removal time, so
/// a parent emptied by pruning its children is pruned in the same sweep.
#[derive(Debug, Clone, Default)]
pub struct EmptyDirPruner<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl<F: FileSystem> EmptyDirPruner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the number of directories removed; each one is also passed to
    /// `on_pruned`.
    pub fn sweep(&self, root: &Path, mut on_pruned: impl FnMut(&Path)) -> usize {
        let mut pruned = 0;

        for dir in self.directories_deepest_first(root) {
            match self.fs.is_dir_empty(&dir) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    debug!("skipping {}: {err}", dir.display());
                    continue;
                }
            }
            match self.fs.remove_dir(&dir) {
                Ok(()) => {
                    pruned += 1;
                    on_pruned(&dir);
                }
                Err(err) => debug!("could not prune {}: {err}", dir.display()),
            }
        }

        pruned
    }

    /// All directories strictly below `root`, ordered by component depth,
    /// deepest first.
    fn directories_deepest_first(&self, root: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<(usize, PathBuf)> = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("skipping unreadable entry during prune: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| (depth_from(root, entry.path()), entry.into_path()))
            .collect();

        dirs.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        dirs.into_iter().map(|(_, path)| path).collect()
    }
}
