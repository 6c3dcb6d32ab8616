//! Run configuration.
//!
//! Defaults are applied per category by value construction; nothing here is
//! process-wide state. A [`CleanerConfig`] describes exactly one run.

use crate::errors::{CoreError, Result};
use crate::models::RunMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMES: [&str; 2] = ["__pycache__", ".DS_Store"];
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["log", "tmp"];

/// Raw rule inputs, one collection per match category.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub names: Vec<String>,
    pub extensions: Vec<String>,
    pub patterns: Vec<String>,
}

impl RuleConfig {
    pub fn new(names: Vec<String>, extensions: Vec<String>, patterns: Vec<String>) -> Self {
        Self {
            names,
            extensions,
            patterns,
        }
    }

    /// Fills every category the caller left empty with its default.
    pub fn with_defaults(mut self) -> Self {
        if self.names.is_empty() {
            self.names = DEFAULT_NAMES.iter().map(|s| s.to_string()).collect();
        }
        if self.extensions.is_empty() {
            self.extensions = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect();
        }
        self
    }

    /// Layers `self` over `base`: a non-empty category here wins.
    pub fn or(self, base: RuleConfig) -> Self {
        fn pick(top: Vec<String>, base: Vec<String>) -> Vec<String> {
            if top.is_empty() { base } else { top }
        }
        Self {
            names: pick(self.names, base.names),
            extensions: pick(self.extensions, base.extensions),
            patterns: pick(self.patterns, base.patterns),
        }
    }
}

/// Everything one cleaning run needs.
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    pub root: PathBuf,
    pub rules: RuleConfig,
    pub max_depth: Option<usize>,
    pub mode: RunMode,
    pub prune_empty_dirs: bool,
}

impl CleanerConfig {
    /// Preview-only run over `root` with the default rules.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: RuleConfig::default().with_defaults(),
            max_depth: None,
            mode: RunMode::Preview,
            prune_empty_dirs: false,
        }
    }

    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules.with_defaults();
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_prune_empty_dirs(mut self, prune: bool) -> Self {
        self.prune_empty_dirs = prune;
        self
    }
}

/// Settings read from a TOML file.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub rules: RuleConfig,
    pub max_depth: Option<usize>,
    pub remove_empty_dirs: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|err| CoreError::config(path, err.to_string()))?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| CoreError::config(path, err.to_string()))
    }
}
