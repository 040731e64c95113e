//! # Record Errors
//!
//! Raised only while converting untyped JSON into records.

use thiserror::Error;

/// Result type for record conversion
pub type RecordResult<T> = Result<T, RecordError>;

/// Record conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Root value was not a JSON object
    #[error("Record must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// Arrays are not part of the record model
    #[error("Unsupported array value at '{0}'")]
    UnsupportedArray(String),
}

/// Short JSON type name used in error messages
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
