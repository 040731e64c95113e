//! Filter expression language
//!
//! Per-column predicates (`contains`, `eq`, `neq`, relational, `between`),
//! their parser, value coercion, and the free-text search predicate.
//!
//! Nothing in this module returns an error: malformed input degrades to a
//! best-effort predicate and incomparable values simply do not match.

mod coerce;
mod parser;
mod predicate;
mod search;

pub use coerce::{parse_datetime, parse_number, Coerced, Kind};
pub use parser::parse_expression;
pub use predicate::{matches_predicate, FilterOperator, Operand, Predicate};
pub use search::matches_search;
