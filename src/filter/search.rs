//! Free-text search across every value of a record

use crate::record::{Record, Value};

/// True if any scalar reachable in the record contains `term`,
/// case-insensitively. An empty term matches every record.
pub fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    contains_term(record, &term.to_lowercase())
}

fn contains_term(record: &Record, needle: &str) -> bool {
    record.iter().any(|(_, value)| match value {
        Value::Record(inner) => contains_term(inner, needle),
        scalar => scalar
            .text_form()
            .is_some_and(|text| text.to_lowercase().contains(needle)),
    })
}
