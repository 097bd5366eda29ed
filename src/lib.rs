#![forbid(unsafe_code)]

//! # TODO Notifier
//!
//! Automated TODO tracking and notifications for your codebase.
//!
//! Scans a source tree for `TODO` annotations embedded in comments,
//! extracts structured metadata (assignee, due date, message, location),
//! and produces categorized summaries — by module, overdue items, items
//! due within a week — optionally rendered as HTML and delivered by email.
//!
//! ## Annotation format
//!
//! ```text
//! # TODO {2024-12-31} @jane_doe Implement user authentication
//! ```
//!
//! Marker, bracketed date, `@user` and message, each optional after the
//! marker but only recognized in that order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use todo_notifier::{driver, Config, Connect, ConnectMethod};
//!
//! fn main() -> todo_notifier::Result<()> {
//!     let connect = Connect::new(
//!         ConnectMethod::GitClone,
//!         "your-project",
//!         "https://github.com/your-username/your-project.git",
//!         Some("main".to_string()),
//!     );
//!     let config = Config::default();
//!     driver::run(&connect, &config, None)
//! }
//! ```

pub mod commands;
pub mod config;
pub mod connect;
pub mod constants;
pub mod driver;
pub mod error;
pub mod models;
pub mod notify;
pub mod parse;
pub mod report;
pub mod scan;
pub mod summary;

// Re-exports
pub use config::{Config, EmailConfig};
pub use connect::{Connect, ConnectMethod};
pub use error::{Error, Result};
pub use models::{parse_flexible_date, TodoRecord, User};
pub use notify::{EmailNotifier, Notifier};
pub use parse::{parse_files_for_todo_items, DateBracketStyle, LineOffsetMap, TodoParser};
pub use scan::{collect_files, ExcludeMatcher, ExcludeOverrides, ExcludeRules};
pub use summary::{
    default_generators, generate_summaries, generators_by_name, ByModuleSummary,
    ExpiredTodosByUserSummary, SummaryGenerator, UpcomingWeekTodosByUserSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
