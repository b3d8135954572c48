//! GISource error types.

use thiserror::Error;

/// Crate-wide error type. One variant per collaborator concern so a failed
/// run reports which external system broke.
#[derive(Error, Debug)]
pub enum GisourceError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("Document error: {0}")]
    Doc(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GisourceError>;
