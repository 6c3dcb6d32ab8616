use crate::errors::CoreError;
use crate::models::EntryKind;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filesystem abstraction boundary for the scan, delete and prune phases.
///
/// Keeping this trait narrow makes it easy to inject failures in tests
/// without touching real permissions.
pub trait FileSystem: Send + Sync {
    /// Reads metadata, following symbolic links.
    fn metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Reads symlink metadata.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Removes a file or symbolic link.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> crate::Result<()>;

    /// Removes a directory and everything beneath it.
    fn remove_dir_all(&self, path: &Path) -> crate::Result<()>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>>;

    /// Current type of `path`, without following symbolic links.
    fn entry_kind(&self, path: &Path) -> crate::Result<EntryKind> {
        let metadata = self.symlink_metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        })
    }

    /// True when the directory has no entries at all, hidden ones included.
    fn is_dir_empty(&self, path: &Path) -> crate::Result<bool> {
        self.list_dir(path).map(|children| children.is_empty())
    }

    /// Counts `path` plus everything beneath it, without following links.
    ///
    /// Best effort: unreadable or vanished parts of the tree are skipped.
    fn count_tree(&self, path: &Path) -> usize {
        WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter(|result| match result {
                Ok(_) => true,
                Err(err) => {
                    debug!("not counting {}: {err}", err.path().unwrap_or(path).display());
                    false
                }
            })
            .count()
    }
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::metadata(path).map_err(|err| CoreError::io(path, err))
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| CoreError::io(path, err))
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| CoreError::io(path, err))
    }

    fn remove_dir(&self, path: &Path) -> crate::Result<()> {
        fs::remove_dir(path).map_err(|err| CoreError::io(path, err))
    }

    fn remove_dir_all(&self, path: &Path) -> crate::Result<()> {
        fs::remove_dir_all(path).map_err(|err| CoreError::io(path, err))
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .map_err(|err| CoreError::io(path, err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| CoreError::io(path, err))
    }

    fn is_dir_empty(&self, path: &Path) -> crate::Result<bool> {
        let mut entries = fs::read_dir(path).map_err(|err| CoreError::io(path, err))?;
        Ok(entries.next().is_none())
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn metadata(&self, path: &Path) -> crate::Result<Metadata> {
        (**self).metadata(path)
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        (**self).symlink_metadata(path)
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        (**self).remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> crate::Result<()> {
        (**self).remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> crate::Result<()> {
        (**self).remove_dir_all(path)
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        (**self).list_dir(path)
    }

    fn is_dir_empty(&self, path: &Path) -> crate::Result<bool> {
        (**self).is_dir_empty(path)
    }

    fn count_tree(&self, path: &Path) -> usize {
        (**self).count_tree(path)
    }
}
