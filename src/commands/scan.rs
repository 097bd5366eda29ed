//! Scan command: parse a local directory tree for TODO items.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use console::style;

use crate::config::Config;
use crate::notify::{EmailNotifier, Notifier};
use crate::parse::TodoParser;
use crate::report::store_html;
use crate::scan::{collect_files, ExcludeMatcher};
use crate::summary::{default_generators, generate_summaries, generators_by_name};

/// Options for the scan command
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Root directory to scan
    pub root: PathBuf,
    /// Override for the configured file extension
    pub extension: Option<String>,
    /// Match todo markers regardless of case
    pub ignore_case: bool,
    /// Persist the rendered HTML reports
    pub save_reports: bool,
    /// Directory for persisted reports
    pub report_dir: Option<PathBuf>,
    /// Send the configured email notification
    pub notify: bool,
}

/// Execute the scan command
pub fn execute_scan(options: ScanOptions, mut config: Config) -> Result<()> {
    if let Some(extension) = options.extension {
        config.extension = extension;
    }
    if options.ignore_case {
        config.ignore_todo_case = true;
    }
    if options.save_reports {
        config.save_html_reports = true;
    }
    if let Some(dir) = options.report_dir {
        config.report_dir = Some(dir);
    }

    let root = options.root.canonicalize()?;
    println!(
        "{} Scanning {} for TODO items...",
        style("→").cyan(),
        root.display()
    );

    let exclude_dirs = ExcludeMatcher::new(&config.effective_exclude_dirs())?;
    let exclude_files = ExcludeMatcher::new(&config.effective_exclude_files())?;
    let files = collect_files(&root, &config.extension, &exclude_dirs, &exclude_files);

    let parser = TodoParser::new(config.ignore_todo_case, config.date_bracket)?;
    // Keys become "<dirname>/<relative path>", matching what a checkout
    // scan produces.
    let scan_root = root.parent().unwrap_or(&root);
    let all_todos = parser.parse_files(scan_root, &files);

    let total: usize = all_todos.values().map(Vec::len).sum();
    println!(
        "{} Parsed {} files, found {} TODO items",
        style("✓").green(),
        all_todos.len(),
        total
    );
    for (module, records) in &all_todos {
        if !records.is_empty() {
            println!("  {}: {}", module, records.len());
        }
    }

    let mut generators = match &config.summary_generators {
        Some(names) => generators_by_name(names)?,
        None => default_generators(),
    };
    generate_summaries(&all_todos, &mut generators, config.generate_html);

    if config.generate_html && config.save_html_reports {
        for generator in &generators {
            let path = store_html(
                generator.html(),
                generator.name(),
                config.report_dir.as_deref(),
            )?;
            println!("{} Report written to {}", style("✓").green(), path.display());
        }
    }

    if options.notify {
        let email = config
            .email
            .as_ref()
            .ok_or_else(|| anyhow!("--notify requires email settings in the config file"))?;
        let notifier = EmailNotifier::from_config(email)?;
        let summaries: Vec<(String, String)> = generators
            .iter()
            .map(|g| (g.name().to_string(), g.html().to_string()))
            .collect();
        notifier.notify(&summaries)?;
        println!("{} Summary email sent", style("✓").green());
    }

    Ok(())
}
