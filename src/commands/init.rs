//! Init command: write a default configuration file.

use std::path::Path;

use anyhow::{bail, Result};
use console::style;

use crate::config::Config;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Overwrite an existing config file
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions, config_path: &Path) -> Result<()> {
    if config_path.exists() && !options.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save(config_path)?;
    println!(
        "{} Wrote default config to {}",
        style("✓").green(),
        config_path.display()
    );
    Ok(())
}
