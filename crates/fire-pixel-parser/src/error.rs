//! Error types for fire-pixel extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fire-pixel operations.
pub type FirePixelResult<T> = Result<T, FirePixelError>;

/// Error types for reading and exporting fire-pixel tables.
#[derive(Error, Debug)]
pub enum FirePixelError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The granule could not be opened as NetCDF
    #[error("failed to open NetCDF file {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// The named group is absent from the file
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// One of the detection arrays is absent from the group
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// A variable exists but its values could not be read
    #[error("failed to read variable {name}: {message}")]
    Read { name: String, message: String },

    /// The detection arrays disagree in length
    #[error("fire-pixel arrays disagree in length: {name} has {len} values, expected {expected}")]
    ShapeMismatch {
        name: String,
        len: usize,
        expected: usize,
    },

    /// CSV serialization or write error
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}
