//! Console report rendering.

use crate::helpers::{format_duration, sanitize_user_path};
use crate::models::{Counts, MatchSet, RemovalOutcome, RunReport};
use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Receives everything a run wants to tell the user.
pub trait Reporter {
    fn nothing_found(&mut self);
    fn preview(&mut self, matches: &MatchSet);
    fn dry_run(&mut self);
    fn declined(&mut self);
    fn removal(&mut self, outcome: &RemovalOutcome);
    fn pruned(&mut self, dir: &Path);
    fn summary(&mut self, report: &RunReport, pruning: bool);
}

/// Plain-text reporter writing one line per event.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{args}") {
            debug!("report output failed: {err}");
        }
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

pub fn summary_line(report: &RunReport, pruning: bool) -> String {
    let Counts {
        removed,
        items_removed,
        failed,
        pruned,
        inaccessible,
        ..
    } = report.counts;
    let mut line = format!(
        "done in {}. removed {removed} target(s) ({items_removed} item(s)), {failed} failed",
        format_duration(report.elapsed())
    );
    if pruning {
        line.push_str(&format!(", plus {pruned} empty directorie(s)"));
    }
    if inaccessible > 0 {
        line.push_str(&format!("; {inaccessible} unreadable entr(ies) skipped"));
    }
    line.push('.');
    line
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn nothing_found(&mut self) {
        self.line(format_args!("no matching junk found. you're all clean! for now..."));
    }

    fn preview(&mut self, matches: &MatchSet) {
        self.line(format_args!("found {} target(s):", matches.len()));
        for path in matches.paths() {
            self.line(format_args!("  {}", sanitize_user_path(path)));
        }
        if matches.inaccessible > 0 {
            self.line(format_args!(
                "skipped {} unreadable entr(ies) while scanning.",
                matches.inaccessible
            ));
        }
    }

    fn dry_run(&mut self) {
        self.line(format_args!(
            "\ndry-run only. use --yes to delete. add --no-prompt to skip confirmation."
        ));
    }

    fn declined(&mut self) {
        self.line(format_args!("aborted. nothing was deleted."));
    }

    fn removal(&mut self, outcome: &RemovalOutcome) {
        match outcome {
            RemovalOutcome::Removed { entry, items } if entry.is_dir() => self.line(format_args!(
                "removed dir {} ({items} item(s))",
                sanitize_user_path(&entry.path)
            )),
            RemovalOutcome::Removed { entry, .. } => self.line(format_args!(
                "removed file {}",
                sanitize_user_path(&entry.path)
            )),
            RemovalOutcome::Failed { entry, error } => self.line(format_args!(
                "failed to remove {}: {error}",
                sanitize_user_path(&entry.path)
            )),
        }
    }

    fn pruned(&mut self, dir: &Path) {
        self.line(format_args!("removed empty dir {}", sanitize_user_path(dir)));
    }

    fn summary(&mut self, report: &RunReport, pruning: bool) {
        let line = summary_line(report, pruning);
        self.line(format_args!("{line}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, RunOutcome};
    use chrono::Utc;

    fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn preview_lists_every_path() {
        let mut matches = MatchSet::new("/r");
        matches.entries.push(Entry::file("/r/cache.tmp"));
        matches.entries.push(Entry::dir("/r/__pycache__"));

        let text = render(|r| r.preview(&matches));
        assert_eq!(text, "found 2 target(s):\n  /r/cache.tmp\n  /r/__pycache__\n");
    }

    #[test]
    fn removal_lines_distinguish_kinds() {
        let text = render(|r| {
            r.removal(&RemovalOutcome::Removed {
                entry: Entry::dir("/r/__pycache__"),
                items: 3,
            });
            r.removal(&RemovalOutcome::Removed {
                entry: Entry::file("/r/a.log"),
                items: 1,
            });
        });
        assert_eq!(text, "removed dir /r/__pycache__ (3 item(s))\nremoved file /r/a.log\n");
    }

    #[test]
    fn summary_mentions_pruning_only_when_requested() {
        let now = Utc::now();
        let report = RunReport {
            outcome: RunOutcome::Completed,
            counts: Counts {
                matched: 3,
                removed: 2,
                items_removed: 4,
                failed: 1,
                pruned: 1,
                inaccessible: 0,
            },
            started_at: now,
            finished_at: now,
        };
        assert_eq!(
            summary_line(&report, false),
            "done in 0ms. removed 2 target(s) (4 item(s)), 1 failed."
        );
        assert!(summary_line(&report, true).ends_with("1 failed, plus 1 empty directorie(s)."));
    }

    #[test]
    fn unreadable_entries_show_up_in_preview_and_summary() {
        let mut matches = MatchSet::new("/r");
        matches.entries.push(Entry::file("/r/cache.tmp"));
        matches.inaccessible = 2;

        let text = render(|r| r.preview(&matches));
        assert!(text.ends_with("skipped 2 unreadable entr(ies) while scanning.\n"));

        let now = Utc::now();
        let report = RunReport {
            outcome: RunOutcome::Completed,
            counts: Counts {
                matched: 1,
                removed: 1,
                items_removed: 1,
                inaccessible: 2,
                ..Counts::default()
            },
            started_at: now,
            finished_at: now,
        };
        assert_eq!(
            summary_line(&report, true),
            "done in 0ms. removed 1 target(s) (1 item(s)), 0 failed, plus 0 empty directorie(s); \
             2 unreadable entr(ies) skipped."
        );
    }
}
