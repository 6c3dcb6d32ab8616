//! Rule-driven junk file cleaner.
//!
//! A run scans a root directory for entries matching a [`RuleSet`] (exact
//! names, file extensions, name regexes), previews them, optionally asks for
//! confirmation, removes them one by one tolerating individual failures, and
//! can finish with a deepest-first sweep of directories left empty.

pub mod config;
pub mod deleter;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod models;
pub mod orchestrator;
pub mod pruner;
pub mod report;
pub mod rules;
pub mod scanner;

pub use config::{CleanerConfig, FileConfig, RuleConfig, DEFAULT_EXTENSIONS, DEFAULT_NAMES};
pub use deleter::Deleter;
pub use errors::{CoreError, Result};
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{depth_from, format_duration, lower_extension, resolve_root, sanitize_user_path};
pub use models::{
    Counts,
    Entry,
    EntryKind,
    ExitStatusLike,
    MatchSet,
    RemovalOutcome,
    RunMode,
    RunOutcome,
    RunReport,
};
pub use orchestrator::{Cleaner, Confirm, CONFIRM_PROMPT};
pub use pruner::EmptyDirPruner;
pub use report::{ConsoleReporter, Reporter};
pub use rules::RuleSet;
pub use scanner::Scanner;

/// Re-export the common API surface for front ends.
pub mod prelude {
    pub use crate::{
        config::*,
        errors::{CoreError, Result},
        fs::{FileSystem, RealFileSystem},
        models::*,
        orchestrator::{Cleaner, Confirm},
        report::{ConsoleReporter, Reporter},
        rules::RuleSet,
    };
}
