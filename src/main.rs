#![forbid(unsafe_code)]
//! TODO Notifier command line interface

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todo_notifier::commands::{
    execute_clone, execute_init, execute_scan, CloneOptions, InitOptions, ScanOptions,
};
use todo_notifier::Config;

#[derive(Parser)]
#[command(name = "todo-notifier")]
#[command(about = "Automated TODO tracking and notifications for your codebase")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = "todo-notifier.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a local directory tree for TODO items
    Scan {
        /// Root directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// File extension to scan, without the dot
        #[arg(short, long)]
        extension: Option<String>,

        /// Match todo markers regardless of case
        #[arg(long)]
        ignore_case: bool,

        /// Write the rendered HTML reports
        #[arg(long)]
        save_reports: bool,

        /// Directory for HTML reports
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Send the configured email notification
        #[arg(long)]
        notify: bool,
    },

    /// Clone a git repository and run the full pipeline on it
    Clone {
        /// Repository URL
        url: String,

        /// Project directory name (defaults to the URL's last path segment)
        #[arg(long)]
        name: Option<String>,

        /// Branch to check out
        #[arg(short, long)]
        branch: Option<String>,

        /// Write the rendered HTML reports
        #[arg(long)]
        save_reports: bool,

        /// Directory for HTML reports
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Send the configured email notification
        #[arg(long)]
        notify: bool,
    },

    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Commands::Scan {
            root,
            extension,
            ignore_case,
            save_reports,
            report_dir,
            notify,
        } => execute_scan(
            ScanOptions {
                root,
                extension,
                ignore_case,
                save_reports,
                report_dir,
                notify,
            },
            config,
        ),
        Commands::Clone {
            url,
            name,
            branch,
            save_reports,
            report_dir,
            notify,
        } => execute_clone(
            CloneOptions {
                url,
                name,
                branch,
                save_reports,
                report_dir,
                notify,
            },
            config,
        ),
        Commands::Init { force } => execute_init(InitOptions { force }, &cli.config),
    }
}
