//! Removal phase. Every entry gets exactly one attempt.

use crate::fs::{FileSystem, RealFileSystem};
use crate::models::{Counts, Entry, EntryKind, MatchSet, RemovalOutcome};
use tracing::{error, info};

/// Removes matched entries in list order, tolerating per-entry failure.
///
/// Nested matches are not de-duplicated: once a matched directory is gone its
/// matched descendants fail as "already gone", which is recorded and skipped.
#[derive(Debug, Clone, Default)]
pub struct Deleter<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl<F: FileSystem> Deleter<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Removes every entry and hands each outcome to `on_outcome` as it happens.
    pub fn apply(&self, matches: &MatchSet, mut on_outcome: impl FnMut(&RemovalOutcome)) -> Counts {
        let mut counts = Counts {
            matched: matches.len(),
            ..Counts::default()
        };

        for entry in matches {
            let outcome = match self.remove(entry) {
                Ok(items) => RemovalOutcome::Removed {
                    entry: entry.clone(),
                    items,
                },
                Err(err) => {
                    if err.is_not_found() {
                        info!("already removed: {}", entry.path.display());
                    } else {
                        error!("failed to remove {}: {err}", entry.path.display());
                    }
                    RemovalOutcome::Failed {
                        entry: entry.clone(),
                        error: err,
                    }
                }
            };
            counts.record(&outcome);
            on_outcome(&outcome);
        }

        counts
    }

    fn remove(&self, entry: &Entry) -> crate::Result<usize> {
        match entry.kind {
            EntryKind::Directory => {
                let items = self.fs.count_tree(&entry.path);
                self.fs.remove_dir_all(&entry.path)?;
                Ok(items)
            }
            EntryKind::File => {
                self.fs.remove_file(&entry.path)?;
                Ok(1)
            }
        }
    }
}
