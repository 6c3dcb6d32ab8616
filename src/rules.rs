//! The junk predicate.

use crate::config::RuleConfig;
use crate::errors::{CoreError, Result};
use crate::helpers::normalize_extension;
use crate::models::{Entry, EntryKind};
use regex::Regex;
use std::collections::HashSet;

/// Exact names, file extensions and name regexes, OR'd together.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    names: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Regex>,
}

impl RuleSet {
    /// Builds a rule set, failing on the first pattern that does not compile.
    pub fn new<N, E, P>(names: N, extensions: E, patterns: P) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let names = names.into_iter().map(Into::into).collect();
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|err| CoreError::invalid_pattern(pattern, err))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            names,
            extensions,
            patterns,
        })
    }

    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        Self::new(
            config.names.iter().cloned(),
            &config.extensions,
            &config.patterns,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.extensions.is_empty() && self.patterns.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let name = entry.name();

        if self.names.contains(&*name) {
            return true;
        }

        if entry.kind == EntryKind::File {
            if let Some(ext) = entry.extension_lower() {
                if self.extensions.contains(&ext) {
                    return true;
                }
            }
        }

        self.patterns.iter().any(|pattern| pattern.is_match(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn truth_table_over_all_criteria() {
        // (name hit, extension hit, pattern hit) for both entry kinds.
        for name_hit in [false, true] {
            for ext_hit in [false, true] {
                for pattern_hit in [false, true] {
                    for kind in [EntryKind::File, EntryKind::Directory] {
                        let name = if name_hit { "junk" } else { "keep" };
                        let ext = if ext_hit { "bak" } else { "txt" };
                        let stem = if pattern_hit { "draft~" } else { "draft" };
                        let file_name = format!("{stem}-{name}.{ext}");

                        let rules = RuleSet::new(
                            if name_hit { vec![file_name.clone()] } else { vec!["other".to_string()] },
                            ["bak"],
                            ["~"],
                        )
                        .unwrap();
                        let entry = Entry::new(format!("/root/{file_name}"), kind, 1);

                        let expected =
                            name_hit || (ext_hit && kind == EntryKind::File) || pattern_hit;
                        assert_eq!(
                            rules.matches(&entry),
                            expected,
                            "name={name_hit} ext={ext_hit} pattern={pattern_hit} kind={kind}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn empty_rule_set_matches_nothing() {
        let rules = RuleSet::new(NONE, NONE, NONE).unwrap();
        assert!(rules.is_empty());
        assert!(!rules.matches(&Entry::file("/r/a.log")));
        assert!(!rules.matches(&Entry::dir("/r/__pycache__")));
    }

    #[test]
    fn names_match_files_and_directories() {
        let rules = RuleSet::new(["__pycache__", ".DS_Store"], NONE, NONE).unwrap();
        assert!(rules.matches(&Entry::dir("/r/__pycache__")));
        assert!(rules.matches(&Entry::file("/r/.DS_Store")));
        assert!(!rules.matches(&Entry::file("/r/.ds_store")));
    }

    #[test]
    fn extensions_are_case_insensitive_and_files_only() {
        let rules = RuleSet::new(NONE, [".TMP", "Log"], NONE).unwrap();
        assert!(rules.matches(&Entry::file("/r/cache.tmp")));
        assert!(rules.matches(&Entry::file("/r/DEBUG.LOG")));
        assert!(!rules.matches(&Entry::dir("/r/archive.log")));
        assert!(!rules.matches(&Entry::file("/r/.log")));
        assert!(!rules.matches(&Entry::file("/r/log")));
    }

    #[test]
    fn patterns_search_the_base_name_only() {
        let rules = RuleSet::new(NONE, NONE, [r"\.orig", "^tmp"]).unwrap();
        assert!(rules.matches(&Entry::file("/r/main.rs.orig.bak")));
        assert!(rules.matches(&Entry::dir("/r/tmp-build")));
        assert!(!rules.matches(&Entry::file("/r/tmp-build/keep.rs")));
    }

    #[test]
    fn bad_pattern_fails_construction() {
        let err = RuleSet::new(NONE, NONE, ["ok", "(unclosed"]).unwrap_err();
        match err {
            CoreError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_config_uses_every_category() {
        let config = RuleConfig::new(
            vec!["Thumbs.db".into()],
            vec!["bak".into()],
            vec![".*~$".into()],
        );
        let rules = RuleSet::from_config(&config).unwrap();
        assert!(rules.matches(&Entry::file("/r/Thumbs.db")));
        assert!(rules.matches(&Entry::file("/r/notes.BAK")));
        assert!(rules.matches(&Entry::file("/r/notes.txt~")));
        assert!(!rules.matches(&Entry::file("/r/notes.txt")));
    }
}
