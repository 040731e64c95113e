//! Query engine
//!
//! Pipeline, in strict order:
//!
//! 1. Filter by search term and every active column predicate (AND)
//! 2. Count matches
//! 3. Sort by the sort keys (stable)
//! 4. Slice the requested page
//! 5. Project each record to the requested columns and format
//!
//! The engine is a pure function of its inputs. It holds no state and never
//! fails.

use super::descriptor::{OutputFormat, Projection, QueryDescriptor};
use super::result::ResultPage;
use super::sorter::ResultSorter;
use crate::filter::{matches_search, Predicate};
use crate::record::{flatten, leaf_paths, project, resolve_field, Record};

/// A column filter after parsing
#[derive(Debug, Clone)]
pub struct ColumnFilter<'q> {
    pub path: &'q str,
    pub predicate: Predicate,
}

impl ColumnFilter<'_> {
    pub fn matches(&self, record: &Record) -> bool {
        self.predicate.matches(resolve_field(record, self.path))
    }
}

/// Executes query descriptors against record slices
pub struct QueryEngine;

impl QueryEngine {
    /// Run a query
    pub fn run(records: &[Record], descriptor: &QueryDescriptor) -> ResultPage {
        let filters = Self::compile_filters(descriptor);

        let mut matched: Vec<&Record> = records
            .iter()
            .filter(|record| matches_search(record, &descriptor.search))
            .filter(|record| filters.iter().all(|f| f.matches(record)))
            .collect();

        let total = matched.len();

        ResultSorter::sort(&mut matched, &descriptor.sort);

        let window: &[&Record] = match descriptor.page {
            Some(page) => {
                let start = page.offset().min(total);
                let end = page.end().min(total);
                &matched[start..end]
            }
            None => &matched,
        };

        let records = window
            .iter()
            .map(|record| Self::project(record, &descriptor.projection, descriptor.format))
            .collect();

        ResultPage {
            records,
            total,
            page: descriptor.page,
        }
    }

    /// Parse every non-empty filter expression.
    ///
    /// Empty expressions produce no predicate and leave the column
    /// unfiltered.
    pub fn compile_filters(descriptor: &QueryDescriptor) -> Vec<ColumnFilter<'_>> {
        descriptor
            .filters
            .iter()
            .filter_map(|(path, raw)| {
                Predicate::parse(raw).map(|predicate| ColumnFilter {
                    path: path.as_str(),
                    predicate,
                })
            })
            .collect()
    }

    fn project(record: &Record, projection: &Projection, format: OutputFormat) -> Record {
        match (format, projection) {
            (OutputFormat::Flat, Projection::All) => flatten(record, &leaf_paths(record)),
            (OutputFormat::Flat, Projection::Columns(paths)) => flatten(record, paths),
            (OutputFormat::Nested, Projection::All) => record.clone(),
            (OutputFormat::Nested, Projection::Columns(paths)) => project(record, paths),
        }
    }
}

/// Convenience wrapper for [`QueryEngine::run`]
pub fn run(records: &[Record], descriptor: &QueryDescriptor) -> ResultPage {
    QueryEngine::run(records, descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{PageRequest, SortKey};
    use serde_json::json;

    fn users() -> Vec<Record> {
        [
            json!({"id": 1, "name": "Ann", "address": {"city": "Berlin"}, "joined": "2024-02-01"}),
            json!({"id": 2, "name": "Bob", "address": {"city": "Paris"}, "joined": "2023-11-20"}),
            json!({"id": 3, "name": "Cid", "address": {"city": "Berlin"}}),
        ]
        .iter()
        .map(|v| Record::from_json(v).unwrap())
        .collect()
    }

    fn ids(page: &ResultPage) -> Vec<serde_json::Value> {
        page.iter().map(|r| r.to_json()["id"].clone()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let page = QueryEngine::run(&users(), &QueryDescriptor::new());
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_filters_are_anded() {
        let descriptor = QueryDescriptor::new()
            .with_filter("address.city", "berlin")
            .with_filter("id", ">1");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(page.total, 1);
        assert_eq!(ids(&page), vec![json!(3)]);
    }

    #[test]
    fn test_search_and_filter() {
        let descriptor = QueryDescriptor::new()
            .with_search("b")
            .with_filter("id", "<=2");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(ids(&page), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_date_filter_excludes_absent() {
        let descriptor = QueryDescriptor::new().with_filter("joined", "2024-01-01..");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(ids(&page), vec![json!(1)]);
    }

    #[test]
    fn test_total_counts_before_pagination() {
        let descriptor = QueryDescriptor::new()
            .with_sort(SortKey::desc("id"))
            .with_page(PageRequest::from_numbers(1, 2).unwrap());
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(page.total, 3);
        assert_eq!(ids(&page), vec![json!(3), json!(2)]);
        assert!(page.pagination().unwrap().has_next);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let descriptor = QueryDescriptor::new().with_page(PageRequest::from_numbers(9, 5).unwrap());
        let page = QueryEngine::run(&users(), &descriptor);
        assert!(page.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_flat_projection() {
        let descriptor = QueryDescriptor::new()
            .with_columns(["id", "address.city"])
            .with_format(OutputFormat::Flat)
            .with_filter("id", "==2");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(page.records[0].to_json(), json!({"id": 2, "city": "Paris"}));
    }

    #[test]
    fn test_flat_all_flattens_every_leaf() {
        let descriptor = QueryDescriptor::new()
            .with_format(OutputFormat::Flat)
            .with_filter("id", "1");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(
            page.records[0].to_json(),
            json!({"id": 1, "name": "Ann", "city": "Berlin", "joined": "2024-02-01"})
        );
    }

    #[test]
    fn test_nested_projection() {
        let descriptor = QueryDescriptor::new()
            .with_columns(["name", "address.city"])
            .with_filter("id", "=3");
        let page = QueryEngine::run(&users(), &descriptor);
        assert_eq!(
            page.records[0].to_json(),
            json!({"name": "Cid", "address": {"city": "Berlin"}})
        );
    }

    #[test]
    fn test_compile_skips_empty_expressions() {
        let descriptor = QueryDescriptor::new()
            .with_filter("address.city", "")
            .with_filter("id", "  ");
        assert!(QueryEngine::compile_filters(&descriptor).is_empty());
    }
}
