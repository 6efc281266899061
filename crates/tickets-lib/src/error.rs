//! Error types for `tickets-lib`.

use thiserror::Error;

/// Primary error type for ticket store operations.
#[derive(Error, Debug)]
pub enum TicketError {
    // === Ticket Errors ===
    /// Ticket ID does not have the `TICKET-<number>` form.
    #[error("Invalid ticket ID format: {id}")]
    InvalidId { id: String },

    /// Ticket with the specified ID was not found.
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    // === Field Errors ===
    /// Invalid status value.
    #[error("Invalid status: {status} (expected Open, In Progress or Closed)")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority} (expected High, Medium or Low)")]
    InvalidPriority { priority: String },

    /// Assignee is not one of the known team members.
    #[error("Invalid assignee: {assignee}")]
    InvalidAssignee { assignee: String },

    /// Date is not in `YYYY-MM-DD` form.
    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", join_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    // === CSV Errors ===
    /// Failed to parse a record of an exported CSV table.
    #[error("CSV parse error at line {line}: {reason}")]
    CsvParse { line: usize, reason: String },

    // === Configuration Errors ===
    /// Seed or session configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl TicketError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }
}

/// Result type using `TicketError`.
pub type Result<T> = std::result::Result<T, TicketError>;
