//! Sequences scan, gate, delete and prune for one run.

use crate::config::CleanerConfig;
use crate::deleter::Deleter;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::helpers::resolve_root;
use crate::models::{Counts, RunMode, RunOutcome, RunReport};
use crate::pruner::EmptyDirPruner;
use crate::report::Reporter;
use crate::rules::RuleSet;
use crate::scanner::Scanner;
use chrono::Utc;
use tracing::debug;

/// Prompt shown before anything is deleted in [`RunMode::Confirm`].
pub const CONFIRM_PROMPT: &str = "delete the above paths?";

/// Yes/no decision supplied by the front end.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Runs the whole preview, confirm, delete, prune workflow.
#[derive(Debug, Clone)]
pub struct Cleaner<F: FileSystem = RealFileSystem> {
    config: CleanerConfig,
    fs: F,
}

impl Cleaner<RealFileSystem> {
    pub fn new(config: CleanerConfig) -> Self {
        Self::with_fs(config, RealFileSystem)
    }
}

impl<F: FileSystem> Cleaner<F> {
    pub fn with_fs(config: CleanerConfig, fs: F) -> Self {
        Self { config, fs }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Executes one run.
    ///
    /// Configuration errors (bad root, bad pattern) are returned before the
    /// filesystem is touched. Everything after that is reported, not returned.
    pub fn run(&self, reporter: &mut dyn Reporter, confirm: &mut dyn Confirm) -> Result<RunReport> {
        let started_at = Utc::now();
        let root = resolve_root(&self.config.root)?;
        let rules = RuleSet::from_config(&self.config.rules)?;

        debug!("scanning {}", root.display());
        let matches = Scanner::with_fs(&self.fs)
            .max_depth(self.config.max_depth)
            .find(&root, &rules);

        let mut counts = Counts {
            matched: matches.len(),
            inaccessible: matches.inaccessible,
            ..Counts::default()
        };
        let finish = |outcome: RunOutcome, counts: Counts| RunReport {
            outcome,
            counts,
            started_at,
            finished_at: Utc::now(),
        };

        if matches.is_empty() {
            reporter.nothing_found();
            return Ok(finish(RunOutcome::NothingFound, counts));
        }

        reporter.preview(&matches);

        let proceed = match self.config.mode {
            RunMode::Preview => {
                reporter.dry_run();
                return Ok(finish(RunOutcome::PreviewOnly, counts));
            }
            RunMode::Confirm => confirm.confirm(CONFIRM_PROMPT),
            RunMode::Unattended => true,
        };
        if !proceed {
            reporter.declined();
            return Ok(finish(RunOutcome::Declined, counts));
        }

        debug!("deleting {} target(s)", matches.len());
        let deleted = Deleter::new(&self.fs).apply(&matches, |outcome| reporter.removal(outcome));
        counts.removed = deleted.removed;
        counts.items_removed = deleted.items_removed;
        counts.failed = deleted.failed;

        if self.config.prune_empty_dirs {
            debug!("pruning empty directories under {}", root.display());
            counts.pruned = EmptyDirPruner::new(&self.fs).sweep(&root, |dir| reporter.pruned(dir));
        }

        let report = finish(RunOutcome::Completed, counts);
        reporter.summary(&report, self.config.prune_empty_dirs);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::errors::CoreError;
    use crate::report::ConsoleReporter;
    use std::fs;

    fn junk_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        fs::write(dir.path().join("cache.tmp"), "x").unwrap();
        dir
    }

    fn never(_: &str) -> bool {
        panic!("confirmation must not be requested")
    }

    #[test]
    fn preview_never_asks_or_mutates() {
        let dir = junk_tree();
        let cleaner = Cleaner::new(CleanerConfig::new(dir.path()));
        let mut reporter = ConsoleReporter::new(Vec::new());

        let report = cleaner.run(&mut reporter, &mut never).unwrap();

        assert_eq!(report.outcome, RunOutcome::PreviewOnly);
        assert_eq!(report.counts.matched, 1);
        assert!(dir.path().join("cache.tmp").exists());
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("dry-run only"));
    }

    #[test]
    fn confirm_mode_asks_once_and_respects_no() {
        let dir = junk_tree();
        let config = CleanerConfig::new(dir.path()).with_mode(RunMode::Confirm);
        let mut prompts = Vec::new();
        let mut answer_no = |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        };

        let report = Cleaner::new(config)
            .run(&mut ConsoleReporter::new(Vec::new()), &mut answer_no)
            .unwrap();

        assert_eq!(prompts, vec![CONFIRM_PROMPT.to_string()]);
        assert_eq!(report.outcome, RunOutcome::Declined);
        assert!(!report.mutated());
        assert!(dir.path().join("cache.tmp").exists());
    }

    #[test]
    fn unattended_mode_deletes_without_asking() {
        let dir = junk_tree();
        let config = CleanerConfig::new(dir.path()).with_mode(RunMode::Unattended);

        let report = Cleaner::new(config)
            .run(&mut ConsoleReporter::new(Vec::new()), &mut never)
            .unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.counts.removed, 1);
        assert!(!dir.path().join("cache.tmp").exists());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn nothing_found_is_success() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        let mut reporter = ConsoleReporter::new(Vec::new());

        let report = Cleaner::new(CleanerConfig::new(dir.path()))
            .run(&mut reporter, &mut never)
            .unwrap();

        assert_eq!(report.outcome, RunOutcome::NothingFound);
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("no matching junk found"));
    }

    #[test]
    fn bad_pattern_fails_before_scanning() {
        let dir = junk_tree();
        let rules = RuleConfig::new(Vec::new(), Vec::new(), vec!["[".into()]);
        let config = CleanerConfig::new(dir.path())
            .with_rules(rules)
            .with_mode(RunMode::Unattended);

        let err = Cleaner::new(config)
            .run(&mut ConsoleReporter::new(Vec::new()), &mut never)
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidPattern { .. }));
        assert!(dir.path().join("cache.tmp").exists());
    }

    #[test]
    fn missing_root_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleanerConfig::new(dir.path().join("missing"));
        let err = Cleaner::new(config)
            .run(&mut ConsoleReporter::new(Vec::new()), &mut never)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRoot { .. }));
    }
}
