//! Configuration composition: scan settings, exclusion overrides, report
//! and notification options, with JSON load/save and sensible defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parse::DateBracketStyle;
use crate::scan::{ExcludeOverrides, ExcludeRules};

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "py".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File extension to scan, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Also match lower/mixed-case markers like `todo` and `Todo`.
    #[serde(default)]
    pub ignore_todo_case: bool,

    /// Delimiter pair around the due-date token.
    #[serde(default)]
    pub date_bracket: DateBracketStyle,

    /// Start from the built-in directory exclusions.
    #[serde(default = "default_true")]
    pub use_default_exclude_dirs: bool,

    /// Start from the built-in file exclusions.
    #[serde(default = "default_true")]
    pub use_default_exclude_files: bool,

    /// Directory exclusion categories overlaid on the base set.
    #[serde(default)]
    pub exclude_dirs: ExcludeOverrides,

    /// File exclusion categories overlaid on the base set.
    #[serde(default)]
    pub exclude_files: ExcludeOverrides,

    /// Summary generators to run, by display name. `None` runs the default
    /// registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_generators: Option<Vec<String>>,

    /// Render HTML for each summary generator.
    #[serde(default = "default_true")]
    pub generate_html: bool,

    /// Persist rendered HTML reports. Only effective with `generate_html`.
    #[serde(default)]
    pub save_html_reports: bool,

    /// Directory for persisted reports; defaults to `.report`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,

    /// SMTP delivery settings; absent disables email notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            ignore_todo_case: false,
            date_bracket: DateBracketStyle::default(),
            use_default_exclude_dirs: true,
            use_default_exclude_files: true,
            exclude_dirs: ExcludeOverrides::default(),
            exclude_files: ExcludeOverrides::default(),
            summary_generators: None,
            generate_html: true,
            save_html_reports: false,
            report_dir: None,
            email: None,
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` or fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Directory exclusions with user overrides applied.
    pub fn effective_exclude_dirs(&self) -> ExcludeRules {
        let base = if self.use_default_exclude_dirs {
            ExcludeRules::default_dirs()
        } else {
            ExcludeRules::default()
        };
        base.merged(&self.exclude_dirs)
    }

    /// File exclusions with user overrides applied.
    pub fn effective_exclude_files(&self) -> ExcludeRules {
        let base = if self.use_default_exclude_files {
            ExcludeRules::default_files()
        } else {
            ExcludeRules::default()
        };
        base.merged(&self.exclude_files)
    }
}

/// SMTP notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host, e.g. `smtp.gmail.com`.
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Address the summary is sent from (also the SMTP login).
    pub sender: String,

    /// Addresses the summary is sent to.
    #[serde(default)]
    pub receivers: Vec<String>,

    /// SMTP password; when absent the `TODO_NOTIFIER_SMTP_PASSWORD`
    /// environment variable is consulted instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.ignore_todo_case = true;
        config.extension = "rs".to_string();
        config.exclude_dirs.names = Some(vec!["fixtures".to_string()]);
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.ignore_todo_case, true);
        assert_eq!(loaded.extension, "rs");
        assert_eq!(loaded.exclude_dirs.names, Some(vec!["fixtures".to_string()]));
    }

    #[test]
    fn load_or_default_survives_missing_file() {
        let config = Config::load_or_default("/nonexistent/todo-notifier.config.json");
        assert_eq!(config.extension, "py");
        assert!(config.generate_html);
        assert!(!config.save_html_reports);
    }

    #[test]
    fn effective_excludes_combine_defaults_and_overrides() {
        let mut config = Config::default();
        config.exclude_dirs.names = Some(vec!["generated".to_string()]);

        let dirs = config.effective_exclude_dirs();
        assert_eq!(dirs.names, vec!["generated".to_string()]);
        // Pattern category untouched by the override.
        assert_eq!(dirs.patterns, ExcludeRules::default_dirs().patterns);

        config.use_default_exclude_files = false;
        assert_eq!(config.effective_exclude_files(), ExcludeRules::default());
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.extension, "py");
        assert!(config.use_default_exclude_dirs);
        assert!(config.email.is_none());

        let email: EmailConfig = serde_json::from_str(
            r#"{"smtp_host": "smtp.example.com", "sender": "todo@example.com"}"#,
        )
        .unwrap();
        assert_eq!(email.smtp_port, 465);
        assert!(email.receivers.is_empty());
    }
}
