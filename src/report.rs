//! HTML report persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Directory reports land in when the caller names none.
pub const DEFAULT_REPORT_DIR: &str = ".report";

/// Writes `html` into `target_dir` under `report_name`, creating the
/// directory when needed. A report name without an extension gets `.html`
/// appended. Returns the path written.
pub fn store_html(html: &str, report_name: &str, target_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = target_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));
    fs::create_dir_all(&dir)?;

    let file_name = if report_name.contains('.') {
        report_name.to_string()
    } else {
        format!("{report_name}.html")
    };
    let path = dir.join(file_name);
    fs::write(&path, html)?;
    info!(report = %path.display(), "stored html report");
    Ok(path)
}
