//! TODO annotation extraction.
//!
//! Scans raw file text for `TODO` markers, derives per-occurrence fields
//! (due date, assignee, message) with fallback rules, and resolves each
//! occurrence back to the 1-indexed physical line it begins on via a
//! per-file line-offset map.
//!
//! Failure isolation is at the finest applicable granularity: a file that
//! cannot be read contributes an empty record list under its key, and a
//! malformed occurrence is skipped without discarding the rest of the
//! file's annotations.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::Result;
use crate::models::{TodoRecord, User};

/// Which delimiter pair encloses the due-date token.
///
/// Both pairs appear in the annotation format's history; curly is the
/// documented `TODO {YYYY-MM-DD} @user message` form and the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBracketStyle {
    #[default]
    Curly,
    Square,
}

impl DateBracketStyle {
    /// Sub-pattern recognizing, in fixed order, an optional bracketed date,
    /// an optional `@user` token and the trailing free-form message.
    fn field_pattern(self) -> &'static str {
        match self {
            DateBracketStyle::Curly => r"TODO\s*(\{.*\})?\s*(@\S*)?\s*(.*)?",
            DateBracketStyle::Square => r"TODO\s*(\[.*\])?\s*(@\S*)?\s*(.*)?",
        }
    }
}

/// Per-line byte lengths for one file, 1-indexed and terminator-inclusive.
///
/// Built once per file and read-only afterward. Match spans and stored
/// lengths use the same unit (bytes), so offset-to-line resolution stays
/// exact for any input encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsetMap {
    line_lengths: Vec<usize>,
}

impl LineOffsetMap {
    /// Reads `path` and indexes it line by line. Read failures propagate to
    /// the caller, which owns file-level containment.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_content(&content))
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            line_lengths: content.split_inclusive('\n').map(str::len).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    /// Length of 1-indexed line `line_number`, terminator included.
    pub fn line_length(&self, line_number: usize) -> Option<usize> {
        self.line_lengths.get(line_number.checked_sub(1)?).copied()
    }

    /// Resolves a match start offset to the line it falls on: per-line
    /// lengths are accumulated in order until the running total reaches the
    /// offset, and the line where that first happens is the answer.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let mut running = 0usize;
        for (index, length) in self.line_lengths.iter().enumerate() {
            running += length;
            if running >= offset {
                return index + 1;
            }
        }
        self.line_lengths.len().max(1)
    }
}

/// Compiled marker and field patterns for one scan configuration.
pub struct TodoParser {
    marker: Regex,
    fields: Regex,
}

impl TodoParser {
    /// Compiles the patterns. With `case_insensitive` set, `todo`/`Todo`
    /// variants trigger matches in both the marker scan and the field
    /// extraction; otherwise only the exact uppercase marker does.
    pub fn new(case_insensitive: bool, bracket: DateBracketStyle) -> Result<Self> {
        let marker = RegexBuilder::new(r"TODO.*")
            .case_insensitive(case_insensitive)
            .multi_line(true)
            .build()?;
        let fields = RegexBuilder::new(bracket.field_pattern())
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self { marker, fields })
    }

    /// Parses `files` one by one to collect all todo items, keyed by each
    /// file's path relative to `scan_root` (which keeps temporary checkout
    /// paths out of the output).
    ///
    /// Every input file gets a key in the result, in input order, even when
    /// it cannot be read: a failed file is logged and contributes an empty
    /// list while the remaining files are still processed.
    pub fn parse_files(
        &self,
        scan_root: &Path,
        files: &[PathBuf],
    ) -> IndexMap<String, Vec<TodoRecord>> {
        let parsed: Vec<(String, Vec<TodoRecord>)> = files
            .par_iter()
            .map(|file| {
                let module = relative_module_path(scan_root, file);
                let records = match self.parse_file(file, &module) {
                    Ok(records) => records,
                    Err(err) => {
                        error!(file = %file.display(), %err, "error parsing todo items in file");
                        Vec::new()
                    }
                };
                (module, records)
            })
            .collect();
        parsed.into_iter().collect()
    }

    fn parse_file(&self, file: &Path, module: &str) -> Result<Vec<TodoRecord>> {
        let offsets = LineOffsetMap::from_file(file)?;
        let content = std::fs::read_to_string(file)?;
        Ok(self.parse_content(&content, &offsets, module))
    }

    /// Scans one file's content for all non-overlapping marker occurrences.
    /// Each occurrence spans from the marker to end-of-line, so a second
    /// marker on the same physical line lands in the first one's message.
    pub fn parse_content(
        &self,
        content: &str,
        offsets: &LineOffsetMap,
        module: &str,
    ) -> Vec<TodoRecord> {
        let mut records = Vec::new();
        for (index, occurrence) in self.marker.find_iter(content).enumerate() {
            match self.extract_record(occurrence.as_str(), occurrence.start(), offsets, module) {
                Some(record) => records.push(record),
                None => {
                    warn!(module, index, "skipping malformed todo occurrence");
                }
            }
        }
        records
    }

    /// Derives one record from the matched occurrence text. Absent tokens
    /// fall back to the sentinel assignee and due date; a component out of
    /// the fixed date -> user -> message order is absorbed into the message.
    fn extract_record(
        &self,
        occurrence: &str,
        start_offset: usize,
        offsets: &LineOffsetMap,
        module: &str,
    ) -> Option<TodoRecord> {
        let captures = self.fields.captures(occurrence.trim_end_matches('\r'))?;

        let message = captures.get(3).map(|m| m.as_str()).unwrap_or("");

        let assignee = match captures.get(2).map(|m| m.as_str()) {
            // Strip the leading `@`; a bare `@` names nobody.
            Some(token) if token.len() > 1 => User::new(&token[1..]),
            _ => User::unknown(),
        };

        let raw_due_date = captures
            .get(1)
            .map(|m| {
                let token = m.as_str();
                &token[1..token.len() - 1]
            })
            .unwrap_or("");

        let line_number = offsets.line_for_offset(start_offset);
        Some(TodoRecord::new(
            message,
            assignee,
            raw_due_date,
            module,
            line_number,
        ))
    }
}

/// Parses the list of `files` one by one to collect all todo items.
///
/// Top-level entry point: returns a mapping from relative file path to the
/// ordered todo records found in that file, with a key for every input file
/// regardless of per-file parse success. Uses the default date bracket
/// style; build a [`TodoParser`] directly to pick another.
pub fn parse_files_for_todo_items(
    scan_root: &Path,
    files: &[PathBuf],
    case_insensitive: bool,
) -> Result<IndexMap<String, Vec<TodoRecord>>> {
    let parser = TodoParser::new(case_insensitive, DateBracketStyle::default())?;
    Ok(parser.parse_files(scan_root, files))
}

fn relative_module_path(scan_root: &Path, file: &Path) -> String {
    file.strip_prefix(scan_root)
        .unwrap_or(file)
        .to_string_lossy()
        .to_string()
}
