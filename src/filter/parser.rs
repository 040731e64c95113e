//! # Filter Expression Parser
//!
//! Turns a raw per-column filter string into a [`Predicate`].
//!
//! Grammar, first match wins:
//!
//! 1. `a..b`: inclusive range, split at the first `..`; either side may be
//!    empty (unbounded)
//! 2. `>=`, `<=`, `!=`, `==`, `>`, `<`, `=` prefix, longest first
//! 3. anything else: case-insensitive substring
//!
//! An empty expression is no predicate at all.

use super::predicate::{FilterOperator, Operand, Predicate};

const RANGE_MARKER: &str = "..";

/// Prefix operators in detection order. `>=` must be tried before `>`, and
/// `==` before `=`.
const PREFIX_OPERATORS: [(&str, FilterOperator); 7] = [
    (">=", FilterOperator::Gte),
    ("<=", FilterOperator::Lte),
    ("!=", FilterOperator::Neq),
    ("==", FilterOperator::Eq),
    (">", FilterOperator::Gt),
    ("<", FilterOperator::Lt),
    ("=", FilterOperator::Eq),
];

/// Parse a raw filter expression
pub fn parse_expression(raw: &str) -> Option<Predicate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some((low, high)) = raw.split_once(RANGE_MARKER) {
        return Some(Predicate {
            operator: FilterOperator::Between,
            operand: Operand::new(low.trim()),
            operand2: Some(Operand::new(high.trim())),
        });
    }

    for (prefix, operator) in PREFIX_OPERATORS {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return Some(Predicate::new(operator, rest.trim()));
        }
    }

    Some(Predicate::contains(raw))
}

impl Predicate {
    /// Parse a raw filter expression; see [`parse_expression`]
    pub fn parse(raw: &str) -> Option<Self> {
        parse_expression(raw)
    }
}
