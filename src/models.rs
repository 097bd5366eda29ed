//! Core data model for parsed annotations.
//!
//! Standard format for a todo item:
//! `TODO {YYYY-MM-DD} @user_name inline_msg`. The marker has to be in
//! capital letters unless case-insensitive matching is enabled. Only one
//! todo item is recognized per line; a second marker on the same line
//! becomes part of the first item's message. The amount of whitespace
//! between marker, date, user and message is not significant.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPLETION_DATE, UNKNOWN_USER_NAME};

/// Identity a TODO item is assigned to.
///
/// Two users are the same grouping identity when their names match exactly
/// (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The sentinel identity used when an annotation names nobody.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_USER_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_USER_NAME
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One parsed TODO occurrence.
///
/// `due_date` and `assignee` are never absent: construction substitutes the
/// sentinel values when the corresponding token is missing or unparsable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Inline message, possibly empty, preserved verbatim.
    pub message: String,
    /// Assignee, or [`User::unknown`] when unspecified.
    pub assignee: User,
    /// Date the item is supposed to be completed by, or
    /// [`DEFAULT_COMPLETION_DATE`] when absent or unparsable.
    pub due_date: NaiveDate,
    /// Path of the containing file relative to the scan root.
    pub module: String,
    /// 1-indexed line the annotation begins on.
    pub line_number: usize,
}

impl TodoRecord {
    /// Builds a record from raw extracted tokens. Date parsing never fails;
    /// an uninterpretable `raw_due_date` falls back to the sentinel.
    pub fn new(
        message: impl Into<String>,
        assignee: User,
        raw_due_date: &str,
        module: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            message: message.into(),
            assignee,
            due_date: parse_flexible_date(raw_due_date).unwrap_or(DEFAULT_COMPLETION_DATE),
            module: module.into(),
            line_number,
        }
    }

    /// Whether the annotation carried a usable date token.
    pub fn has_explicit_due_date(&self) -> bool {
        self.due_date != DEFAULT_COMPLETION_DATE
    }
}

impl fmt::Display for TodoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TODO: {} ASSIGNED TO: {} COMPLETE BY: {} AT: {}:{}",
            self.message, self.assignee, self.due_date, self.module, self.line_number
        )
    }
}

/// Interprets a human-entered date string.
///
/// Accepts a handful of common formats rather than strict ISO only; missing
/// day (or day and month) components default to the first. Returns `None`
/// for anything uninterpretable so callers can substitute the sentinel.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if cleaned.is_empty() {
        return None;
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y.%m.%d",
        "%m/%d/%Y",
        "%d %b %Y",
        "%d %B %Y",
        "%b %d %Y",
        "%B %d %Y",
    ];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }

    // Year-month ("2024-05") and bare year ("2024").
    if let Some((year, month)) = cleaned.split_once(['-', '/']) {
        if year.len() == 4 && (1..=2).contains(&month.len()) {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1);
        }
        return None;
    }
    if cleaned.len() == 4 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(cleaned.parse().ok()?, 1, 1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_flexible_date("2024-12-31"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn parses_loose_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 25);
        assert_eq!(parse_flexible_date("2024/12/25"), expected);
        assert_eq!(parse_flexible_date("12/25/2024"), expected);
        assert_eq!(parse_flexible_date("25 Dec 2024"), expected);
        assert_eq!(parse_flexible_date("Dec 25, 2024"), expected);
        assert_eq!(parse_flexible_date("  2024-12-25  "), expected);
    }

    #[test]
    fn parses_partial_dates() {
        assert_eq!(
            parse_flexible_date("2024-05"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(
            parse_flexible_date("2024"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("2024-13-40"), None);
        assert_eq!(parse_flexible_date("13"), None);
    }

    #[test]
    fn record_falls_back_to_sentinels() {
        let record = TodoRecord::new("fix it", User::unknown(), "nonsense", "src/lib.rs", 3);
        assert_eq!(record.due_date, DEFAULT_COMPLETION_DATE);
        assert!(!record.has_explicit_due_date());
        assert!(record.assignee.is_unknown());
    }

    #[test]
    fn user_identity_is_case_sensitive() {
        assert_ne!(User::new("Alice"), User::new("alice"));
        assert_eq!(User::new("alice"), User::new("alice"));
    }
}
