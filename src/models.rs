use crate::errors::CoreError;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Type of a filesystem entry, cached when the entry was inspected.
///
/// Symbolic links are recorded as files: removing one unlinks the link and
/// never touches its target.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One filesystem object met during a walk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Path components between the scan root and this entry.
    pub depth: usize,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, depth: usize) -> Self {
        Self {
            path: path.into(),
            kind,
            depth,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File, 1)
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory, 1)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Base name of the entry, lossily decoded.
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    /// Lower-cased extension without the separator, if non-empty.
    pub fn extension_lower(&self) -> Option<String> {
        crate::helpers::lower_extension(&self.path)
    }
}

/// Entries selected by one scan, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pub root: PathBuf,
    pub entries: Vec<Entry>,
    /// Entries the walk could not inspect.
    pub inaccessible: usize,
}

impl MatchSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
            inaccessible: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|entry| entry.path.as_path())
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of one removal attempt.
#[derive(Debug)]
pub enum RemovalOutcome {
    /// `items` counts the target plus everything that was beneath it.
    Removed { entry: Entry, items: usize },
    Failed { entry: Entry, error: CoreError },
}

impl RemovalOutcome {
    pub fn entry(&self) -> &Entry {
        match self {
            Self::Removed { entry, .. } | Self::Failed { entry, .. } => entry,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    /// The target was missing when its turn came, typically because a matched
    /// ancestor was removed first.
    pub fn is_already_gone(&self) -> bool {
        matches!(self, Self::Failed { error, .. } if error.is_not_found())
    }
}

/// Run summary tallies.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Counts {
    pub matched: usize,
    pub removed: usize,
    pub items_removed: usize,
    pub failed: usize,
    pub pruned: usize,
    pub inaccessible: usize,
}

impl Counts {
    pub fn record(&mut self, outcome: &RemovalOutcome) {
        match outcome {
            RemovalOutcome::Removed { items, .. } => {
                self.removed += 1;
                self.items_removed += items;
            }
            RemovalOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// How far a run may go once targets are found.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum RunMode {
    /// List targets only.
    #[default]
    Preview,
    /// Ask before deleting.
    Confirm,
    /// Delete without asking.
    Unattended,
}

impl RunMode {
    /// `skip_confirmation` only matters when `act` is set.
    pub fn from_flags(act: bool, skip_confirmation: bool) -> Self {
        match (act, skip_confirmation) {
            (false, _) => Self::Preview,
            (true, false) => Self::Confirm,
            (true, true) => Self::Unattended,
        }
    }

    pub fn acts(&self) -> bool {
        !matches!(self, Self::Preview)
    }
}

/// Terminal state of a run. Every variant is a successful exit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunOutcome {
    NothingFound,
    PreviewOnly,
    Declined,
    Completed,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub counts: Counts,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    pub fn mutated(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExitStatusLike {
    Ok,
    Usage,
    Error,
}

impl ExitStatusLike {
    pub fn as_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Usage => 2,
            Self::Error => 1,
        }
    }
}
