//! Error types for the TODO notifier.

use thiserror::Error;

/// Main error type for TODO notifier operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("unknown summary generator: {0}")]
    UnknownGenerator(String),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("email error: {0}")]
    Email(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("notification error: {0}")]
    Notify(String),

    #[error("error in TODO application: {0}")]
    Driver(String),
}

/// Result type alias for TODO notifier operations
pub type Result<T> = std::result::Result<T, Error>;
