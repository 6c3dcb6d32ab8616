//! Depth-bounded tree walk that collects matching entries.

use crate::errors::CoreError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::models::{Entry, MatchSet};
use crate::rules::RuleSet;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walks a root directory and applies a [`RuleSet`] to every entry.
///
/// The walk is never pruned: a matched directory is still descended into and
/// entries deeper than `max_depth` are still traversed, they just cannot be
/// selected. Nested matches are therefore possible and expected. Symbolic
/// links whose target is missing are skipped.
#[derive(Debug, Clone)]
pub struct Scanner<F: FileSystem = RealFileSystem> {
    fs: F,
    max_depth: Option<usize>,
}

impl Scanner<RealFileSystem> {
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl Default for Scanner<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Scanner<F> {
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            max_depth: None,
        }
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Collects every entry under `root` that `rules` selects.
    ///
    /// Unreadable entries are logged and counted, never fatal.
    pub fn find(&self, root: &Path, rules: &RuleSet) -> MatchSet {
        let mut matches = MatchSet::new(root);

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for result in walker {
            let dir_entry = match result {
                Ok(dir_entry) => dir_entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let err = CoreError::Walk(path, err);
                    if err.is_not_found() {
                        debug!("{err}");
                    } else {
                        warn!("{err}");
                        matches.inaccessible += 1;
                    }
                    continue;
                }
            };

            let depth = dir_entry.depth();
            if self.max_depth.is_some_and(|max| depth > max) {
                continue;
            }

            let path = dir_entry.path();
            let kind = match self.fs.entry_kind(path) {
                Ok(kind) => kind,
                Err(err) if err.is_not_found() => {
                    debug!("entry vanished during scan: {}", path.display());
                    continue;
                }
                Err(err) => {
                    warn!("cannot access {}: {err}", path.display());
                    matches.inaccessible += 1;
                    continue;
                }
            };

            if dir_entry.path_is_symlink() {
                if let Err(err) = self.fs.metadata(path) {
                    debug!("skipping dangling symlink {}: {err}", path.display());
                    continue;
                }
            }

            let entry = Entry::new(path, kind, depth);
            if rules.matches(&entry) {
                debug!("matched {} {}", entry.kind, path.display());
                matches.entries.push(entry);
            }
        }

        matches
    }
}
