//! Dataset loading errors

use thiserror::Error;

use crate::record::RecordError;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Data file could not be read
    #[error("Failed to read data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not valid JSON
    #[error("Invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value is not an array of records
    #[error("Data must be a JSON array of records")]
    NotAnArray,

    /// One element could not be converted
    #[error("Invalid record at index {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: RecordError,
    },
}
