//! # Column Predicates
//!
//! A predicate is one column's parsed filter condition: an operator plus one
//! or two operands. Evaluation never fails; an absent field, an empty
//! operand, or a cross-kind comparison simply does not match.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::coerce::Coerced;
use crate::record::Value;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Case-insensitive substring
    Contains,

    /// Equals
    Eq,

    /// Not equals
    Neq,

    /// Greater than
    Gt,

    /// Greater than or equal
    Gte,

    /// Less than
    Lt,

    /// Less than or equal
    Lte,

    /// Inclusive range, either bound optional
    Between,
}

impl FilterOperator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Between => "between",
        }
    }
}

/// One side of a predicate.
///
/// Keeps the trimmed source text next to its coerced value. An empty operand
/// has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    raw: String,
    value: Option<Coerced>,
}

impl Operand {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = (!raw.is_empty()).then(|| Coerced::parse(&raw));
        Self { raw, value }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<&Coerced> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// A parsed column filter
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub operator: FilterOperator,
    pub operand: Operand,
    pub operand2: Option<Operand>,
}

impl Predicate {
    pub fn new(operator: FilterOperator, operand: impl Into<String>) -> Self {
        Self {
            operator,
            operand: Operand::new(operand),
            operand2: None,
        }
    }

    pub fn contains(operand: impl Into<String>) -> Self {
        Self::new(FilterOperator::Contains, operand)
    }

    pub fn eq(operand: impl Into<String>) -> Self {
        Self::new(FilterOperator::Eq, operand)
    }

    /// Inclusive range; an empty bound is unbounded on that side
    pub fn between(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            operator: FilterOperator::Between,
            operand: Operand::new(low),
            operand2: Some(Operand::new(high)),
        }
    }

    /// Check whether a resolved field value satisfies this predicate.
    ///
    /// `None` is an absent field and never matches.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        let Some(field) = field else {
            return false;
        };

        match self.operator {
            FilterOperator::Contains => self.contains_match(field),
            FilterOperator::Between => self.range_match(field),
            op => {
                let (Some(actual), Some(expected)) =
                    (Coerced::from_value(field), self.operand.value())
                else {
                    return false;
                };
                match op {
                    FilterOperator::Eq => actual.equals(expected) == Some(true),
                    FilterOperator::Neq => actual.equals(expected) == Some(false),
                    FilterOperator::Gt => actual.compare(expected) == Some(Ordering::Greater),
                    FilterOperator::Gte => matches!(
                        actual.compare(expected),
                        Some(Ordering::Greater | Ordering::Equal)
                    ),
                    FilterOperator::Lt => actual.compare(expected) == Some(Ordering::Less),
                    FilterOperator::Lte => matches!(
                        actual.compare(expected),
                        Some(Ordering::Less | Ordering::Equal)
                    ),
                    FilterOperator::Contains | FilterOperator::Between => false,
                }
            }
        }
    }

    fn contains_match(&self, field: &Value) -> bool {
        if self.operand.is_empty() {
            return false;
        }
        field.text_form().is_some_and(|text| {
            text.to_lowercase()
                .contains(&self.operand.raw().to_lowercase())
        })
    }

    fn range_match(&self, field: &Value) -> bool {
        let Some(actual) = Coerced::from_value(field) else {
            return false;
        };

        let low = self.operand.value();
        let high = self.operand2.as_ref().and_then(Operand::value);

        let above_low = low.map_or(true, |lo| {
            matches!(actual.compare(lo), Some(Ordering::Greater | Ordering::Equal))
        });
        let below_high = high.map_or(true, |hi| {
            matches!(actual.compare(hi), Some(Ordering::Less | Ordering::Equal))
        });

        above_low && below_high
    }
}

/// Free-function form of [`Predicate::matches`]
pub fn matches_predicate(field: Option<&Value>, predicate: &Predicate) -> bool {
    predicate.matches(field)
}
