//! Core error types for cubelog-core.
//!
//! The averaging engine itself never fails: malformed times degrade to DNF
//! and missing data is reported as `None`. Everything around it (storage,
//! configuration, import/export, user input) reports through this hierarchy.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cubelog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Import/export errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Import-specific errors.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file is neither JSON nor CSV
    #[error("Unsupported import format: {0}")]
    UnsupportedFormat(String),

    /// JSON document could not be decoded
    #[error("Malformed JSON document: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// JSON document holds neither solves nor blog posts
    #[error("Document contains no solves or blog posts")]
    EmptyDocument,

    /// CSV has no header line
    #[error("CSV file is empty")]
    EmptyCsv,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Time entry is neither a DNF marker nor a non-negative number
    #[error("Invalid time '{0}': enter seconds (e.g. 12.34) or DNF")]
    InvalidTime(String),

    /// Date entry cannot be parsed
    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    /// Empty required field
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Record not found
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
