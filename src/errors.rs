use crate::models::ExitStatusLike;
use std::{io, path::PathBuf};

/// Error type shared by every phase of a cleaning run.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// File system I/O failure.
    #[error("I/O error while accessing {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    /// The directory walk could not read an entry.
    #[error("cannot access {0}: {1}")]
    Walk(PathBuf, #[source] walkdir::Error),

    /// The scan root does not exist or is not a directory.
    #[error("{reason}: {path}")]
    InvalidRoot { path: PathBuf, reason: &'static str },

    /// A user supplied regex failed to compile.
    #[error("invalid regex \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid config {0}: {1}")]
    Config(PathBuf, String),
}

impl CoreError {
    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io(path.into(), error)
    }

    pub fn missing_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: "path does not exist",
        }
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: "not a directory",
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config(path.into(), message.into())
    }

    /// True when the failure means the path is already gone.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io(_, err) => err.kind() == io::ErrorKind::NotFound,
            Self::Walk(_, err) => err
                .io_error()
                .is_some_and(|io| io.kind() == io::ErrorKind::NotFound),
            _ => false,
        }
    }

    /// Process exit status a front end should report for this error.
    pub fn exit_status(&self) -> ExitStatusLike {
        match self {
            Self::InvalidPattern { .. } => ExitStatusLike::Usage,
            _ => ExitStatusLike::Error,
        }
    }
}

/// Shared result alias for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
