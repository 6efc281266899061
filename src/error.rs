//! Error types for the `tix` front end.

use std::path::PathBuf;

use thiserror::Error;
use tickets_lib::{TicketError, ValidationError};

/// Errors raised by commands, configuration and I/O around the store.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error from the ticket store.
    #[error(transparent)]
    Ticket(#[from] TicketError),

    /// Configuration file or environment value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Some actions of a session script failed.
    #[error("{failed} of {total} session actions failed")]
    SessionFailures { failed: usize, total: usize },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Ticket(TicketError::validation(field, reason))
    }
}

impl From<Vec<ValidationError>> for CliError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Ticket(TicketError::from_validation_errors(errors))
    }
}

impl From<ValidationError> for CliError {
    fn from(error: ValidationError) -> Self {
        Self::validation(error.field, error.message)
    }
}

/// Result type using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
