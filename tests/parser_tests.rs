//! File-level parsing contract tests.
//!
//! Exercises the top-level entry point against real files on disk: key
//! completeness, per-file error containment, sentinel fallbacks, line
//! resolution and the case-sensitivity toggle.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use todo_notifier::constants::DEFAULT_COMPLETION_DATE;
use todo_notifier::{parse_files_for_todo_items, User};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn full_annotation_on_a_single_line() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "proj/app.py", "# TODO {2024-12-31} @alice fix bug\n");

    let todos = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    let records = &todos["proj/app.py"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "fix bug");
    assert_eq!(records[0].assignee, User::new("alice"));
    assert_eq!(
        records[0].due_date,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
    assert_eq!(records[0].module, "proj/app.py");
    assert_eq!(records[0].line_number, 1);
}

#[test]
fn bare_marker_gets_sentinel_fields() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "app.py", "TODO\n");

    let todos = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    let records = &todos["app.py"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "");
    assert!(records[0].assignee.is_unknown());
    assert_eq!(records[0].due_date, DEFAULT_COMPLETION_DATE);
    assert_eq!(records[0].line_number, 1);
}

#[test]
fn unreadable_file_still_contributes_its_key() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.py", "# TODO @bob works\n");
    let missing = dir.path().join("deleted-mid-scan.py");

    let todos =
        parse_files_for_todo_items(dir.path(), &[missing.clone(), good], false).unwrap();
    assert_eq!(todos.len(), 2);
    assert!(todos["deleted-mid-scan.py"].is_empty());
    assert_eq!(todos["good.py"].len(), 1);
}

#[test]
fn output_keys_match_input_files_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.py", "no annotations here\n");
    let b = write_file(&dir, "sub/b.py", "# TODO x\n");
    let c = write_file(&dir, "c.py", "# TODO y\n# TODO z\n");

    let todos = parse_files_for_todo_items(dir.path(), &[c, a, b], false).unwrap();
    let keys: Vec<&String> = todos.keys().collect();
    assert_eq!(keys, vec!["c.py", "a.py", "sub/b.py"]);
    assert!(todos["a.py"].is_empty());
    assert_eq!(todos["c.py"].len(), 2);
}

#[test]
fn parsing_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let file = write_file(
        &dir,
        "app.py",
        "# TODO {2024-01-01} @alice one\ncode()\n# TODO @bob two\n",
    );

    let first = parse_files_for_todo_items(dir.path(), &[file.clone()], false).unwrap();
    let second = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn line_numbers_match_physical_lines() {
    let dir = TempDir::new().unwrap();
    let content = "\
def main():
    pass

# TODO {2024-05-01} @alice first
# TODO second
value = 1  # TODO third
";
    let file = write_file(&dir, "app.py", content);

    let todos = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    let lines: Vec<usize> = todos["app.py"].iter().map(|r| r.line_number).collect();
    assert_eq!(lines, vec![4, 5, 6]);
}

#[test]
fn case_toggle_controls_lowercase_markers() {
    let dir = TempDir::new().unwrap();
    let content = "# TODO upper\n# todo lower\n# Todo mixed\n";
    let file = write_file(&dir, "app.py", content);

    let strict = parse_files_for_todo_items(dir.path(), &[file.clone()], false).unwrap();
    assert_eq!(strict["app.py"].len(), 1);
    assert_eq!(strict["app.py"][0].message, "upper");

    let relaxed = parse_files_for_todo_items(dir.path(), &[file], true).unwrap();
    assert_eq!(relaxed["app.py"].len(), 3);
    assert_eq!(relaxed["app.py"][1].line_number, 2);
    assert_eq!(relaxed["app.py"][2].message, "mixed");
}

#[test]
fn second_marker_on_a_line_stays_in_the_message() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "app.py", "# TODO first TODO @ghost not parsed\n");

    let todos = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    let records = &todos["app.py"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "first TODO @ghost not parsed");
    assert!(records[0].assignee.is_unknown());
}

#[test]
fn empty_at_token_and_bad_date_fall_back_to_sentinels() {
    let dir = TempDir::new().unwrap();
    let content = "# TODO {not a date} @ needs owner\n# TODO {} @carla empty date\n";
    let file = write_file(&dir, "app.py", content);

    let todos = parse_files_for_todo_items(dir.path(), &[file], false).unwrap();
    let records = &todos["app.py"];
    assert_eq!(records.len(), 2);
    assert!(records[0].assignee.is_unknown());
    assert_eq!(records[0].due_date, DEFAULT_COMPLETION_DATE);
    assert_eq!(records[1].assignee, User::new("carla"));
    assert_eq!(records[1].due_date, DEFAULT_COMPLETION_DATE);
}
