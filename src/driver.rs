//! End-to-end orchestration: pull, scan, parse, summarize, report, notify.

use tempfile::tempdir;
use tracing::{error, info};

use crate::config::Config;
use crate::connect::Connect;
use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::parse::TodoParser;
use crate::report::store_html;
use crate::scan::{collect_files, ExcludeMatcher};
use crate::summary::{default_generators, generate_summaries, generators_by_name};

/// Main run method that gets triggered to generate summaries and alerts.
///
/// Pulls the repository into a temporary directory, collects candidate
/// files, parses them for TODO items and runs the configured
/// summary/report/notification pipeline. Can be called on demand or from a
/// scheduled task. Any failure is logged and surfaced as a single driver
/// error.
pub fn run(connect: &Connect, config: &Config, notifier: Option<&dyn Notifier>) -> Result<()> {
    run_pipeline(connect, config, notifier).map_err(|err| {
        error!(%err, "error in TODO application");
        Error::Driver(err.to_string())
    })
}

fn run_pipeline(connect: &Connect, config: &Config, notifier: Option<&dyn Notifier>) -> Result<()> {
    let temp_dir = tempdir()?;
    let project_dir = temp_dir.path().join(connect.project_dir_name());

    info!(project_dir = %project_dir.display(), %connect, "pulling the repository into a temporary directory");
    connect.pull_repository(&project_dir)?;

    let exclude_dirs = ExcludeMatcher::new(&config.effective_exclude_dirs())?;
    let exclude_files = ExcludeMatcher::new(&config.effective_exclude_files())?;
    let files = collect_files(&project_dir, &config.extension, &exclude_dirs, &exclude_files);
    info!(files = files.len(), "collected candidate files");

    let parser = TodoParser::new(config.ignore_todo_case, config.date_bracket)?;
    // Relative to the temp dir, so every module key starts with the
    // project directory name rather than a temporary path.
    let all_todos = parser.parse_files(temp_dir.path(), &files);

    let mut generators = match &config.summary_generators {
        Some(names) => generators_by_name(names)?,
        None => default_generators(),
    };
    generate_summaries(&all_todos, &mut generators, config.generate_html);

    if config.generate_html && config.save_html_reports {
        for generator in &generators {
            store_html(generator.html(), generator.name(), config.report_dir.as_deref())?;
        }
    }

    if let Some(notifier) = notifier {
        let summaries: Vec<(String, String)> = generators
            .iter()
            .map(|g| (g.name().to_string(), g.html().to_string()))
            .collect();
        notifier.notify(&summaries)?;
    }

    Ok(())
}
