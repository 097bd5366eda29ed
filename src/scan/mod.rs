//! Directory traversal and exclusion filtering.
//!
//! Supplies the parser with its candidate file list: walks a root
//! directory for files with a configured extension while honoring
//! exclusion rules. Rules come in three combinable categories per target
//! (directories and files): anchored regex name patterns, exact base
//! names, and absolute paths.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::error;
use walkdir::WalkDir;

use crate::constants::{
    DEFAULT_EXCLUDE_DIR_NAMES, DEFAULT_EXCLUDE_DIR_PATTERNS, DEFAULT_EXCLUDE_FILE_NAMES,
    DEFAULT_EXCLUDE_FILE_PATTERNS,
};
use crate::error::Result;

/// Exclusion rules for one target kind (directories or files).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Regex patterns matched against the entry's base name, anchored at
    /// its start.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Exact base names.
    #[serde(default)]
    pub names: Vec<String>,
    /// Absolute paths.
    #[serde(default)]
    pub abs_paths: Vec<PathBuf>,
}

impl ExcludeRules {
    /// Built-in directory exclusions (environments, build output, caches).
    pub fn default_dirs() -> Self {
        Self {
            patterns: to_strings(DEFAULT_EXCLUDE_DIR_PATTERNS),
            names: to_strings(DEFAULT_EXCLUDE_DIR_NAMES),
            abs_paths: Vec::new(),
        }
    }

    /// Built-in file exclusions (compiled artifacts, coverage output, logs).
    pub fn default_files() -> Self {
        Self {
            patterns: to_strings(DEFAULT_EXCLUDE_FILE_PATTERNS),
            names: to_strings(DEFAULT_EXCLUDE_FILE_NAMES),
            abs_paths: Vec::new(),
        }
    }

    /// Overlays user-supplied categories on top of these rules. A category
    /// that is present replaces the base category wholesale; absent
    /// categories keep the base values.
    pub fn merged(mut self, overrides: &ExcludeOverrides) -> Self {
        if let Some(patterns) = &overrides.patterns {
            self.patterns = patterns.clone();
        }
        if let Some(names) = &overrides.names {
            self.names = names.clone();
        }
        if let Some(abs_paths) = &overrides.abs_paths {
            self.abs_paths = abs_paths.clone();
        }
        self
    }
}

/// Per-category overrides for [`ExcludeRules`]; `None` leaves the base
/// category untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExcludeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_paths: Option<Vec<PathBuf>>,
}

/// Compiled form of [`ExcludeRules`]; patterns are compiled once and the
/// matcher is reused for every entry of a walk.
pub struct ExcludeMatcher {
    patterns: Vec<Regex>,
    names: HashSet<String>,
    abs_paths: Vec<PathBuf>,
}

impl ExcludeMatcher {
    pub fn new(rules: &ExcludeRules) -> Result<Self> {
        let patterns = rules
            .patterns
            .iter()
            // Anchor at the start so a pattern matches name prefixes the
            // way the rules are written, not anywhere inside the name.
            .map(|pattern| Regex::new(&format!("^(?:{pattern})")))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            names: rules.names.iter().cloned().collect(),
            abs_paths: rules.abs_paths.clone(),
        })
    }

    /// Whether `path` should be ignored under these rules.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let base_name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        self.patterns.iter().any(|p| p.is_match(&base_name))
            || self.names.contains(base_name.as_ref())
            || self.abs_paths.iter().any(|p| p.as_path() == path)
    }
}

/// Lists the files under `dir` (and its subdirectories) carrying
/// `extension`, pruning excluded directories and dropping excluded files.
///
/// An unreadable directory entry is logged and skipped; it never aborts
/// the rest of the walk. Results are in deterministic (name-sorted) order.
pub fn collect_files(
    dir: &Path,
    extension: &str,
    exclude_dirs: &ExcludeMatcher,
    exclude_files: &ExcludeMatcher,
) -> Vec<PathBuf> {
    let suffix = format!(".{extension}");
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_type().is_dir() || !exclude_dirs.is_excluded(entry.path())
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                error!(%err, "error reading directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.to_string_lossy().ends_with(&suffix) && !exclude_files.is_excluded(path)
        })
        .collect()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
