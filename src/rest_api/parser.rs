//! # Query Parameter Parser
//!
//! Parses `/api/data` query parameters (or the equivalent POST body) into a
//! [`QueryDescriptor`].
//!
//! Column names pass through as given; flat aliases (`city`,
//! `company_name`, ...) are resolved against each record by the engine.

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

use serde::Deserialize;

use super::errors::{RestError, RestResult};
use crate::query::{OutputFormat, PageRequest, QueryDescriptor, SortDirection, SortKey};

/// Parsed query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    /// Requested columns, as the client named them (None = all)
    pub columns: Option<Vec<String>>,

    /// 1-based page number
    pub page: Option<NonZeroUsize>,

    /// Records per page
    pub limit: Option<NonZeroUsize>,

    /// Free-text search term
    pub search: Option<String>,

    /// Sort keys, most significant first
    pub sort_by: Vec<String>,

    /// Directions matched to `sort_by` by position
    pub sort_order: Vec<SortDirection>,

    /// `path -> expression`; a repeated path keeps its last expression
    pub filters: BTreeMap<String, String>,

    pub format: OutputFormat,
}

impl QueryParams {
    /// Parse query parameters from a HashMap
    ///
    /// Unknown parameters are ignored.
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let mut result = QueryParams::default();

        for (key, value) in params {
            match key.as_str() {
                "columns" => result.columns = parse_columns(value),
                "page" => result.page = Some(parse_positive("page", value)?),
                "limit" => result.limit = Some(parse_positive("limit", value)?),
                "search" => result.search = Some(value.clone()),
                "sort_by" => result.sort_by = parse_list(value),
                "sort_order" => result.sort_order = parse_sort_order(value)?,
                "filters" => result.filters = parse_filters(value),
                "format" => result.format = parse_format(value)?,
                _ => {}
            }
        }

        Ok(result)
    }

    /// Column names echoed back in the response
    pub fn echoed_columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Direction for the sort key at `index`; the last given order repeats
    pub fn direction_at(&self, index: usize) -> SortDirection {
        self.sort_order
            .get(index)
            .or(self.sort_order.last())
            .copied()
            .unwrap_or_default()
    }

    /// Build the engine query.
    ///
    /// Pagination applies only when `page` or `limit` was given; the missing
    /// one defaults to `1` or `default_limit`.
    pub fn to_descriptor(
        &self,
        default_limit: usize,
        max_limit: usize,
    ) -> RestResult<QueryDescriptor> {
        let mut descriptor = QueryDescriptor::new().with_format(self.format);

        if let Some(columns) = &self.columns {
            descriptor = descriptor.with_columns(columns.iter().map(String::as_str));
        }

        if let Some(term) = &self.search {
            descriptor = descriptor.with_search(term.as_str());
        }

        for (path, expression) in &self.filters {
            descriptor = descriptor.with_filter(path.as_str(), expression.as_str());
        }

        for (index, path) in self.sort_by.iter().enumerate() {
            let path = path.as_str();
            let key = match self.direction_at(index) {
                SortDirection::Asc => SortKey::asc(path),
                SortDirection::Desc => SortKey::desc(path),
            };
            descriptor = descriptor.with_sort(key);
        }

        if self.page.is_some() || self.limit.is_some() {
            let limit = match self.limit {
                Some(limit) => limit.get(),
                None => default_limit,
            };
            if limit > max_limit {
                return Err(RestError::LimitExceeded(limit, max_limit));
            }
            let page = self.page.map_or(1, NonZeroUsize::get);
            let request = PageRequest::from_numbers(page, limit).ok_or_else(|| {
                RestError::Internal(format!("Invalid default limit: {}", limit))
            })?;
            descriptor = descriptor.with_page(request);
        }

        Ok(descriptor)
    }
}

/// JSON body accepted by `POST /api/data`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataRequest {
    pub columns: Option<Vec<String>>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    /// Comma-separated, like the query parameter
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub filters: BTreeMap<String, String>,
    pub format: Option<String>,
}

impl TryFrom<DataRequest> for QueryParams {
    type Error = RestError;

    fn try_from(request: DataRequest) -> RestResult<Self> {
        let positive = |name: &str, value: Option<usize>| -> RestResult<Option<NonZeroUsize>> {
            value
                .map(|n| {
                    NonZeroUsize::new(n).ok_or_else(|| {
                        RestError::InvalidBody(format!("{} must be >= 1", name))
                    })
                })
                .transpose()
        };

        Ok(QueryParams {
            page: positive("page", request.page)?,
            limit: positive("limit", request.limit)?,
            columns: request.columns.filter(|c| !c.is_empty()),
            search: request.search,
            sort_by: request.sort_by.as_deref().map(parse_list).unwrap_or_default(),
            sort_order: match request.sort_order.as_deref() {
                Some(value) => parse_sort_order(value)?,
                None => Vec::new(),
            },
            filters: request
                .filters
                .into_iter()
                .filter(|(path, _)| !path.trim().is_empty())
                .map(|(path, expression)| (path.trim().to_string(), expression))
                .collect(),
            format: match request.format.as_deref() {
                Some(value) => parse_format(value)?,
                None => OutputFormat::default(),
            },
        })
    }
}

/// Split a comma-separated list, dropping blank entries
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse columns parameter; an empty list means all columns
fn parse_columns(value: &str) -> Option<Vec<String>> {
    let columns = parse_list(value);
    if columns.is_empty() {
        None
    } else {
        Some(columns)
    }
}

/// Parse a page or limit value
fn parse_positive(name: &str, value: &str) -> RestResult<NonZeroUsize> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| RestError::InvalidQueryParam(format!("Invalid {}: {}", name, value)))
}

/// Parse sort_order parameter (comma-separated asc|desc)
fn parse_sort_order(value: &str) -> RestResult<Vec<SortDirection>> {
    parse_list(value)
        .iter()
        .map(|part| part.parse().map_err(RestError::InvalidQueryParam))
        .collect()
}

fn parse_format(value: &str) -> RestResult<OutputFormat> {
    value.trim().parse().map_err(RestError::InvalidQueryParam)
}

/// Parse filters parameter (comma-separated `path:expression` pairs).
///
/// The pair splits at its first `:`, so the expression may itself contain
/// colons (`created_at:>=2024-05-01T12:00:00Z`). Pairs without a `:` are
/// dropped.
pub fn parse_filters(value: &str) -> BTreeMap<String, String> {
    value
        .split(',')
        .filter_map(|pair| pair.split_once(':'))
        .filter_map(|(path, expression)| {
            let path = path.trim();
            if path.is_empty() {
                None
            } else {
                Some((path.to_string(), expression.trim().to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Projection;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters("city:York, id:>=5,created_at:>=2024-05-01T12:00:00Z,bogus");
        assert_eq!(filters.len(), 3);
        assert_eq!(filters["city"], "York");
        assert_eq!(filters["id"], ">=5");
        assert_eq!(filters["created_at"], ">=2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_parse_filters_last_pair_wins() {
        let filters = parse_filters("id:1,id:2");
        assert_eq!(filters["id"], "2");
    }

    #[test]
    fn test_parse_filters_keeps_empty_expression() {
        let filters = parse_filters("city:");
        assert_eq!(filters["city"], "");
    }

    #[test]
    fn test_full_query_params() {
        let query = QueryParams::parse(&params(&[
            ("columns", "id,name,city"),
            ("page", "2"),
            ("limit", "20"),
            ("search", "ann"),
            ("sort_by", "city,id"),
            ("sort_order", "asc,desc"),
            ("filters", "company_name:Acme"),
            ("format", "flat"),
            ("unknown", "ignored"),
        ]))
        .unwrap();

        assert_eq!(
            query.columns,
            Some(vec!["id".to_string(), "name".to_string(), "city".to_string()])
        );
        assert_eq!(query.page.map(NonZeroUsize::get), Some(2));
        assert_eq!(query.limit.map(NonZeroUsize::get), Some(20));
        assert_eq!(query.sort_order, vec![SortDirection::Asc, SortDirection::Desc]);
        assert_eq!(query.format, OutputFormat::Flat);

        let descriptor = query.to_descriptor(10, 100).unwrap();
        assert_eq!(
            descriptor.projection,
            Projection::Columns(vec![
                "id".to_string(),
                "name".to_string(),
                "city".to_string()
            ])
        );
        assert_eq!(descriptor.filters["company_name"], "Acme");
        assert_eq!(
            descriptor.sort,
            vec![SortKey::asc("city"), SortKey::desc("id")]
        );
        assert_eq!(descriptor.page, PageRequest::from_numbers(2, 20));
    }

    #[test]
    fn test_last_sort_order_repeats() {
        let query = QueryParams::parse(&params(&[
            ("sort_by", "a,b,c"),
            ("sort_order", "desc"),
        ]))
        .unwrap();
        assert_eq!(query.direction_at(0), SortDirection::Desc);
        assert_eq!(query.direction_at(2), SortDirection::Desc);

        let unordered = QueryParams::parse(&params(&[("sort_by", "a")])).unwrap();
        assert_eq!(unordered.direction_at(0), SortDirection::Asc);
    }

    #[test]
    fn test_no_pagination_without_page_or_limit() {
        let query = QueryParams::parse(&params(&[("search", "x")])).unwrap();
        assert_eq!(query.to_descriptor(10, 100).unwrap().page, None);
    }

    #[test]
    fn test_pagination_defaults() {
        let only_page = QueryParams::parse(&params(&[("page", "3")])).unwrap();
        assert_eq!(
            only_page.to_descriptor(10, 100).unwrap().page,
            PageRequest::from_numbers(3, 10)
        );

        let only_limit = QueryParams::parse(&params(&[("limit", "5")])).unwrap();
        assert_eq!(
            only_limit.to_descriptor(10, 100).unwrap().page,
            PageRequest::from_numbers(1, 5)
        );
    }

    #[test]
    fn test_invalid_page_and_limit() {
        for (key, value) in [("page", "0"), ("page", "x"), ("limit", "0"), ("limit", "-1")] {
            let result = QueryParams::parse(&params(&[(key, value)]));
            assert!(
                matches!(result, Err(RestError::InvalidQueryParam(_))),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_limit_exceeded() {
        let query = QueryParams::parse(&params(&[("limit", "500")])).unwrap();
        assert_eq!(
            query.to_descriptor(10, 100),
            Err(RestError::LimitExceeded(500, 100))
        );
    }

    #[test]
    fn test_invalid_format_and_order() {
        assert!(QueryParams::parse(&params(&[("format", "xml")])).is_err());
        assert!(QueryParams::parse(&params(&[("sort_order", "up")])).is_err());
    }

    #[test]
    fn test_data_request_conversion() {
        let request: DataRequest = serde_json::from_value(serde_json::json!({
            "columns": ["id", "address.city"],
            "limit": 5,
            "sort_by": "id",
            "sort_order": "desc",
            "filters": {"city": "Berlin"},
            "format": "flat"
        }))
        .unwrap();

        let query = QueryParams::try_from(request).unwrap();
        assert_eq!(query.limit.map(NonZeroUsize::get), Some(5));
        assert_eq!(query.filters["city"], "Berlin");
        assert_eq!(query.format, OutputFormat::Flat);

        let descriptor = query.to_descriptor(10, 100).unwrap();
        assert_eq!(descriptor.sort, vec![SortKey::desc("id")]);
        assert_eq!(descriptor.filters["city"], "Berlin");
    }

    #[test]
    fn test_data_request_rejects_zero_page() {
        let request = DataRequest {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            QueryParams::try_from(request),
            Err(RestError::InvalidBody(_))
        ));
    }
}
