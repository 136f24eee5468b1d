//! Error types for the maintenance tracker.
//!
//! Every fallible operation in the crate returns [`TrackerError`]. The
//! variants are tagged so callers can tell a transport failure from a
//! validation failure or a constraint conflict without inspecting messages.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Tagged error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The record store could not be reached or opened
    #[error("Network error: {message}")]
    Network { message: String },
    /// Required input was missing or could not be parsed
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// The store rejected the write because of a constraint
    #[error("Conflict: {message}")]
    Conflict { message: String },
    /// A record with the given ID does not exist
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: &'static str, id: String },
    /// Any other database failure
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Spreadsheet generation failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A blocking task panicked or was aborted before returning
    #[error("{message}: {source}")]
    Task {
        message: String,
        #[source]
        source: tokio::task::JoinError,
    },
    /// A submission is already running on this form
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    /// The owning view was torn down before the request finished
    #[error("Request cancelled")]
    Cancelled,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    ///
    /// Constraint violations become [`TrackerError::Conflict`] and failures to
    /// open the database become [`TrackerError::Network`]; everything else
    /// stays a [`TrackerError::Database`].
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        match source.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => TrackerError::Conflict {
                message: format!("{}: {}", self.message, source),
            },
            Some(ErrorCode::CannotOpen) | Some(ErrorCode::NotADatabase) => TrackerError::Network {
                message: format!("{}: {}", self.message, source),
            },
            _ => TrackerError::Database {
                message: self.message,
                source,
            },
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationBuilder {
    field: String,
}

impl ValidationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationBuilder {
        ValidationBuilder::new(field)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Wraps a failed blocking-task join.
    pub fn task(message: impl Into<String>, source: tokio::task::JoinError) -> Self {
        Self::Task {
            message: message.into(),
            source,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns true for errors the user could fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true for constraint conflicts reported by the store.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns true when the store itself was unreachable.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message).with_source(e))
    }
}

/// Extension trait for spreadsheet writer results.
pub trait ExportResultExt<T> {
    /// Map spreadsheet errors with a message.
    fn export_context(self, message: &str) -> Result<T>;
}

impl<T> ExportResultExt<T> for std::result::Result<T, rust_xlsxwriter::XlsxError> {
    fn export_context(self, message: &str) -> Result<T> {
        self.map_err(|source| TrackerError::Export {
            message: message.to_string(),
            source,
        })
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
