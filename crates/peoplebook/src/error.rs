//! Error types for peoplebook.
//!
//! This module defines all error types used throughout the peoplebook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for peoplebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read the data file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the data or result file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The default dataset was written but still could not be loaded back.
    #[error("regenerated data file {path} could not be loaded: {message}")]
    Regeneration {
        /// Path to the data file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// Data handed to the store is not a sequence of records.
    #[error("invalid data format for writing: {message}")]
    InvalidCollection {
        /// Description of the rejected value.
        message: String,
    },

    // === Record Errors ===
    /// A record with the same name (ignoring case) already exists.
    #[error("person named '{name}' already exists")]
    DuplicateRecord {
        /// The rejected name.
        name: String,
    },

    /// The name is empty or not made of letters.
    #[error("invalid name '{input}': {reason}")]
    InvalidName {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The gender is not `m` or `f`.
    #[error("invalid gender '{input}': enter only 'm' or 'f'")]
    InvalidGender {
        /// The rejected input.
        input: String,
    },

    /// The height is not a number.
    #[error("invalid height '{input}': enter a number")]
    HeightNotNumber {
        /// The rejected input.
        input: String,
    },

    /// The height is outside the accepted range.
    #[error("unrealistic height {value}: enter a value between {min}-{max} cm")]
    HeightOutOfRange {
        /// The parsed height.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Shell Errors ===
    /// Standard input was closed while a prompt was waiting.
    #[error("input closed")]
    InputClosed,

    // === I/O Errors ===
    /// Console or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for peoplebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid collection error.
    #[must_use]
    pub fn invalid_collection(message: impl Into<String>) -> Self {
        Self::InvalidCollection {
            message: message.into(),
        }
    }

    /// Create an invalid name error.
    #[must_use]
    pub fn invalid_name(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from rejected user input.
    ///
    /// Such errors are answered with a re-prompt rather than aborting the
    /// current operation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidName { .. }
                | Self::InvalidGender { .. }
                | Self::HeightNotNumber { .. }
                | Self::HeightOutOfRange { .. }
        )
    }
}
