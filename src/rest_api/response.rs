//! # Response Formatting
//!
//! Response bodies for the data and column endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::query::{OutputFormat, Pagination, ResultPage};
use crate::record::{ColumnCatalog, ColumnCategory, Record};

/// Query response: one page of records plus the total match count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResponse {
    pub data: Vec<Record>,
    pub total: usize,
    pub columns: Vec<String>,
    pub format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl DataResponse {
    /// Build from an engine result.
    ///
    /// `requested` is echoed as given; when every column was selected the
    /// echo lists the catalog paths (flat) or the top-level keys (nested).
    pub fn from_page(page: ResultPage, requested: Option<&[String]>, format: OutputFormat) -> Self {
        let columns = match requested {
            Some(columns) => columns.to_vec(),
            None => all_columns(format),
        };
        let pagination = page.pagination();
        Self {
            total: page.total,
            data: page.records,
            columns,
            format,
            pagination,
        }
    }

    /// Response with no records and no columns
    pub fn empty(format: OutputFormat) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            columns: Vec::new(),
            format,
            pagination: None,
        }
    }
}

fn all_columns(format: OutputFormat) -> Vec<String> {
    let names = match format {
        OutputFormat::Flat => ColumnCatalog::paths(),
        OutputFormat::Nested => ColumnCatalog::top_level(),
    };
    names.into_iter().map(String::from).collect()
}

/// Column path to display label
pub type ColumnLabels = BTreeMap<&'static str, &'static str>;

fn labels(category: Option<ColumnCategory>) -> ColumnLabels {
    ColumnCatalog::all()
        .iter()
        .filter(|c| category.map_or(true, |wanted| c.category == wanted))
        .map(|c| (c.path, c.label))
        .collect()
}

/// Full column catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnsResponse {
    pub columns: ColumnLabels,
    pub total: usize,
    pub categories: BTreeMap<ColumnCategory, Vec<&'static str>>,
    pub description: &'static str,
}

impl ColumnsResponse {
    pub fn new() -> Self {
        let columns = labels(None);
        let categories = ColumnCategory::ALL
            .into_iter()
            .map(|category| {
                let paths = ColumnCatalog::by_category(category).map(|c| c.path).collect();
                (category, paths)
            })
            .collect();
        Self {
            total: columns.len(),
            columns,
            categories,
            description: "Available columns for data selection",
        }
    }
}

impl Default for ColumnsResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Columns of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryColumnsResponse {
    pub columns: ColumnLabels,
    pub total: usize,
    pub category: ColumnCategory,
}

impl CategoryColumnsResponse {
    pub fn new(category: ColumnCategory) -> Self {
        let columns = labels(Some(category));
        Self {
            total: columns.len(),
            columns,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRequest;
    use serde_json::json;

    fn page(total: usize, request: Option<PageRequest>) -> ResultPage {
        ResultPage {
            records: vec![Record::new().with("id", 1i64)],
            total,
            page: request,
        }
    }

    #[test]
    fn test_pagination_omitted_when_unpaged() {
        let response = DataResponse::from_page(page(1, None), None, OutputFormat::Nested);
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("pagination").is_none());
        assert_eq!(value["format"], "nested");
        assert_eq!(value["columns"][0], "id");
    }

    #[test]
    fn test_pagination_present_when_paged() {
        let response = DataResponse::from_page(
            page(3, PageRequest::from_numbers(1, 1)),
            Some(&["id".to_string()][..]),
            OutputFormat::Flat,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["pagination"],
            json!({"page": 1, "limit": 1, "total": 3, "pages": 3, "has_next": true, "has_prev": false})
        );
        assert_eq!(value["columns"], json!(["id"]));
    }

    #[test]
    fn test_flat_all_columns_echo() {
        let response = DataResponse::from_page(page(1, None), None, OutputFormat::Flat);
        assert_eq!(response.columns.len(), ColumnCatalog::all().len());
        assert!(response.columns.contains(&"address.city".to_string()));
    }

    #[test]
    fn test_columns_response() {
        let response = ColumnsResponse::new();
        assert_eq!(response.total, 15);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["columns"]["address.city"], "City");
        assert_eq!(value["categories"]["company"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_category_response() {
        let response = CategoryColumnsResponse::new(ColumnCategory::Address);
        assert_eq!(response.total, 6);
        assert_eq!(serde_json::to_value(&response).unwrap()["category"], "address");
    }
}
