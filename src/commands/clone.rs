//! Clone command: git-clone a repository and run the full pipeline on it.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use console::style;

use crate::config::Config;
use crate::connect::{Connect, ConnectMethod};
use crate::driver;
use crate::notify::{EmailNotifier, Notifier};

/// Options for the clone command
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Repository URL
    pub url: String,
    /// Project directory name; defaults to the URL's last path segment
    pub name: Option<String>,
    /// Branch to check out
    pub branch: Option<String>,
    /// Persist the rendered HTML reports
    pub save_reports: bool,
    /// Directory for persisted reports
    pub report_dir: Option<PathBuf>,
    /// Send the configured email notification
    pub notify: bool,
}

/// Execute the clone command
pub fn execute_clone(options: CloneOptions, mut config: Config) -> Result<()> {
    if options.save_reports {
        config.save_html_reports = true;
    }
    if let Some(dir) = options.report_dir {
        config.report_dir = Some(dir);
    }

    let name = options
        .name
        .unwrap_or_else(|| project_name_from_url(&options.url));
    let connect = Connect::new(
        ConnectMethod::GitClone,
        name.as_str(),
        options.url.as_str(),
        options.branch,
    );

    let notifier = if options.notify {
        let email = config
            .email
            .as_ref()
            .ok_or_else(|| anyhow!("--notify requires email settings in the config file"))?;
        Some(EmailNotifier::from_config(email)?)
    } else {
        None
    };

    println!("{} Cloning {}...", style("→").cyan(), options.url);
    driver::run(
        &connect,
        &config,
        notifier.as_ref().map(|n| n as &dyn Notifier),
    )?;
    println!("{} TODO summary pipeline finished for {}", style("✓").green(), name);

    Ok(())
}

fn project_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .trim_end_matches(".git")
        .rsplit('/')
        .next()
        .unwrap_or("project")
        .to_string()
}
