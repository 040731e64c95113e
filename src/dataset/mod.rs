//! # Dataset
//!
//! The read-only record collection served by the API. Loaded once from a JSON
//! array and shared behind an `Arc` afterwards.

mod errors;

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::record::{resolve, Number, Record, Value};

pub use errors::{DatasetError, DatasetResult};

/// In-memory record collection
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load a dataset from a JSON file
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a dataset from JSON text
    pub fn from_json_str(content: &str) -> DatasetResult<Self> {
        let value: JsonValue = serde_json::from_str(content)?;
        Self::from_json(&value)
    }

    /// Convert a JSON array of objects
    pub fn from_json(value: &JsonValue) -> DatasetResult<Self> {
        let items = value.as_array().ok_or(DatasetError::NotAnArray)?;
        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Record::from_json(item).map_err(|source| DatasetError::Record { index, source })
            })
            .collect::<DatasetResult<Vec<_>>>()?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the record whose numeric `id` equals `id`
    pub fn find_by_id(&self, id: i64) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| match resolve(record, "id") {
                Some(Value::Number(Number::Int(n))) => *n == id,
                Some(Value::Number(Number::Float(f))) => *f == id as f64,
                _ => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_str() {
        let dataset = Dataset::from_json_str(r#"[{"id": 1}, {"id": 2, "name": "Ervin"}]"#).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.find_by_id(2).is_some());
        assert!(dataset.find_by_id(3).is_none());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = Dataset::from_json_str(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnArray));
    }

    #[test]
    fn test_reports_bad_record_index() {
        let err = Dataset::from_json_str(r#"[{"id": 1}, 5]"#).unwrap_err();
        assert!(matches!(err, DatasetError::Record { index: 1, .. }));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = Dataset::from_json_str("[{").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 7, "name": "Kurtis"}}]"#).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.find_by_id(7).is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
