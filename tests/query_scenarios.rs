//! Query Scenario Tests
//!
//! End-to-end checks of the query pipeline:
//! - Column filters (contains, range, relational, empty expression)
//! - Multi-key sorting
//! - Pagination
//! - The same queries through the HTTP parameter parser

use std::collections::HashMap;

use datatable::query::{PageRequest, QueryDescriptor, QueryEngine, ResultPage, SortKey};
use datatable::record::Record;
use datatable::rest_api::QueryParams;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn cities() -> Vec<Record> {
    [
        json!({"id": 1, "city": "Berlin"}),
        json!({"id": 2, "city": "Paris"}),
        json!({"id": 3, "city": "Berlin"}),
    ]
    .iter()
    .map(|v| Record::from_json(v).unwrap())
    .collect()
}

fn ids(page: &ResultPage) -> Vec<Value> {
    page.iter().map(|r| r.to_json()["id"].clone()).collect()
}

fn run_params(pairs: &[(&str, &str)]) -> ResultPage {
    let raw: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let descriptor = QueryParams::parse(&raw)
        .unwrap()
        .to_descriptor(10, 100)
        .unwrap();
    QueryEngine::run(&cities(), &descriptor)
}

// =============================================================================
// Filter Scenarios
// =============================================================================

/// Contains filter keeps matching cities.
#[test]
fn test_contains_filter() {
    let page = QueryEngine::run(&cities(), &QueryDescriptor::new().with_filter("city", "Berlin"));
    assert_eq!(ids(&page), vec![json!(1), json!(3)]);
    assert_eq!(page.total, 2);
}

/// Inclusive numeric range.
#[test]
fn test_range_filter() {
    let page = QueryEngine::run(&cities(), &QueryDescriptor::new().with_filter("id", "1..2"));
    assert_eq!(ids(&page), vec![json!(1), json!(2)]);
    assert_eq!(page.total, 2);
}

/// Relational filter.
#[test]
fn test_gte_filter() {
    let page = QueryEngine::run(&cities(), &QueryDescriptor::new().with_filter("id", ">=2"));
    assert_eq!(ids(&page), vec![json!(2), json!(3)]);
    assert_eq!(page.total, 2);
}

/// Empty expression leaves the column unfiltered.
#[test]
fn test_empty_expression_is_unfiltered() {
    let page = run_params(&[("filters", "city:")]);
    assert_eq!(page.total, 3);
    assert_eq!(ids(&page), vec![json!(1), json!(2), json!(3)]);
}

// =============================================================================
// Sort and Page Scenarios
// =============================================================================

/// City ascending, then id descending within a city.
#[test]
fn test_multi_key_sort() {
    let descriptor = QueryDescriptor::new()
        .with_sort(SortKey::asc("city"))
        .with_sort(SortKey::desc("id"));
    let page = QueryEngine::run(&cities(), &descriptor);
    assert_eq!(ids(&page), vec![json!(3), json!(1), json!(2)]);
}

/// Second page of size one.
#[test]
fn test_second_page() {
    let descriptor = QueryDescriptor::new()
        .with_sort(SortKey::asc("id"))
        .with_page(PageRequest::from_numbers(2, 1).unwrap());
    let page = QueryEngine::run(&cities(), &descriptor);

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].to_json(), json!({"id": 2, "city": "Paris"}));
    assert_eq!(page.total, 3);
}

/// Page past the end is empty, not an error.
#[test]
fn test_page_out_of_range() {
    let page = run_params(&[("page", "9"), ("limit", "2")]);
    assert!(page.is_empty());
    assert_eq!(page.total, 3);
    let pagination = page.pagination().unwrap();
    assert_eq!(pagination.pages, 2);
    assert!(!pagination.has_next);
    assert!(pagination.has_prev);
}

// =============================================================================
// Through the Parameter Parser
// =============================================================================

/// The same scenarios expressed as HTTP query parameters.
#[test]
fn test_scenarios_via_params() {
    assert_eq!(ids(&run_params(&[("filters", "city:Berlin")])), vec![json!(1), json!(3)]);
    assert_eq!(ids(&run_params(&[("filters", "id:1..2")])), vec![json!(1), json!(2)]);
    assert_eq!(ids(&run_params(&[("filters", "id:>=2")])), vec![json!(2), json!(3)]);
    assert_eq!(
        ids(&run_params(&[("sort_by", "city,id"), ("sort_order", "asc,desc")])),
        vec![json!(3), json!(1), json!(2)]
    );

    let page = run_params(&[("page", "2"), ("limit", "1"), ("sort_by", "id")]);
    assert_eq!(ids(&page), vec![json!(2)]);
    assert_eq!(page.total, 3);
}

/// Several filters combine with AND.
#[test]
fn test_filters_conjunction() {
    let page = run_params(&[("filters", "city:Berlin,id:>1")]);
    assert_eq!(ids(&page), vec![json!(3)]);
}

/// Flat aliases resolve into nested records.
#[test]
fn test_alias_filter_on_nested_records() {
    let users: Vec<Record> = [
        json!({"id": 1, "address": {"city": "Berlin"}, "company": {"name": "Acme"}}),
        json!({"id": 2, "address": {"city": "Paris"}, "company": {"name": "Globex"}}),
    ]
    .iter()
    .map(|v| Record::from_json(v).unwrap())
    .collect();

    let descriptor = QueryDescriptor::new()
        .with_filter("city", "paris")
        .with_columns(["id", "company_name"])
        .with_format(datatable::query::OutputFormat::Flat);
    let page = QueryEngine::run(&users, &descriptor);

    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].to_json(), json!({"id": 2, "company_name": "Globex"}));
}

/// Dates compare chronologically.
#[test]
fn test_datetime_filters() {
    let events: Vec<Record> = [
        json!({"id": 1, "created_at": "2023-12-31"}),
        json!({"id": 2, "created_at": "2024-05-01T13:00:00Z"}),
        json!({"id": 3, "created_at": "2024-07-15"}),
        json!({"id": 4}),
    ]
    .iter()
    .map(|v| Record::from_json(v).unwrap())
    .collect();

    let in_2024 = QueryEngine::run(
        &events,
        &QueryDescriptor::new().with_filter("created_at", "2024-01-01..2024-12-31"),
    );
    assert_eq!(ids(&in_2024), vec![json!(2), json!(3)]);

    let after = QueryEngine::run(
        &events,
        &QueryDescriptor::new().with_filter("created_at", ">=2024-05-01T12:00:00Z"),
    );
    assert_eq!(ids(&after), vec![json!(2), json!(3)]);
}

// =============================================================================
// Unusual Operands
// =============================================================================

/// Operands and values written with non-ASCII digits are text, never a panic.
#[test]
fn test_non_ascii_digit_operands() {
    let arabic_date = "\u{662}\u{660}\u{662}\u{664}-\u{660}\u{661}-\u{660}\u{661}";
    let mut records = cities();
    records.push(Record::from_json(&json!({"id": 4, "city": arabic_date})).unwrap());

    let relational = QueryEngine::run(
        &records,
        &QueryDescriptor::new().with_filter("id", format!(">={}", arabic_date)),
    );
    assert_eq!(relational.total, 0);

    let contains = QueryEngine::run(
        &records,
        &QueryDescriptor::new().with_filter("city", arabic_date),
    );
    assert_eq!(ids(&contains), vec![json!(4)]);

    let sorted = QueryEngine::run(
        &records,
        &QueryDescriptor::new().with_sort(SortKey::asc("city")),
    );
    assert_eq!(sorted.total, 4);
}

/// Negative zero is numerically equal to zero.
#[test]
fn test_signed_zero_filters() {
    let records: Vec<Record> = [
        json!({"id": 1, "balance": 0}),
        json!({"id": 2, "balance": -0.0}),
        json!({"id": 3, "balance": 5}),
    ]
    .iter()
    .map(|v| Record::from_json(v).unwrap())
    .collect();

    let run = |expr: &str| {
        ids(&QueryEngine::run(
            &records,
            &QueryDescriptor::new().with_filter("balance", expr),
        ))
    };
    assert_eq!(run("==-0"), vec![json!(1), json!(2)]);
    assert_eq!(run("!=0"), vec![json!(3)]);
    assert_eq!(run(">=0"), vec![json!(1), json!(2), json!(3)]);
}

/// Integers beyond f64 precision compare exactly.
#[test]
fn test_large_integer_equality() {
    let records = vec![Record::new().with("id", 9_007_199_254_740_992i64)];
    let page = QueryEngine::run(
        &records,
        &QueryDescriptor::new().with_filter("id", "==9007199254740993"),
    );
    assert_eq!(page.total, 0);
}
