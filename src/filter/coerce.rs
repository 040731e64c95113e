//! Value coercion and comparison
//!
//! Operands and field values are classified as a number, an ISO date-time,
//! or text. Only values of the same kind compare; anything else is
//! incomparable and never matches.

use std::cmp::Ordering;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::record::{Number, Value};

static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?)?$",
    )
    .expect("datetime pattern is valid")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]*)?$").expect("number pattern is valid"));

/// Kind of a coerced value.
///
/// The declaration order is the rank used when sorting mixed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Kind {
    Number,
    DateTime,
    Text,
}

/// A value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Number(Number),
    DateTime(DateTime<Utc>),
    Text(String),
}

impl Coerced {
    /// Coerce a raw string: date-time first, then number, then text
    pub fn parse(raw: &str) -> Self {
        if let Some(dt) = parse_datetime(raw) {
            return Coerced::DateTime(dt);
        }
        if let Some(n) = parse_number(raw) {
            return Coerced::Number(n);
        }
        Coerced::Text(raw.to_string())
    }

    /// Coerce a record value.
    ///
    /// Null and nested records have no scalar form and yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Record(_) => None,
            Value::Number(n) => Some(Coerced::Number(*n)),
            Value::Bool(b) => Some(Coerced::Text(b.to_string())),
            Value::Text(s) => Some(Coerced::parse(s)),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Coerced::Number(_) => Kind::Number,
            Coerced::DateTime(_) => Kind::DateTime,
            Coerced::Text(_) => Kind::Text,
        }
    }

    /// Same-kind ordering. Text orders by byte value, case-sensitive.
    pub fn compare(&self, other: &Coerced) -> Option<Ordering> {
        match (self, other) {
            (Coerced::Number(a), Coerced::Number(b)) => a.compare(b),
            (Coerced::DateTime(a), Coerced::DateTime(b)) => Some(a.cmp(b)),
            (Coerced::Text(a), Coerced::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        }
    }

    /// Same-kind equality. Text compares case-insensitively.
    pub fn equals(&self, other: &Coerced) -> Option<bool> {
        match (self, other) {
            (Coerced::Text(a), Coerced::Text(b)) => Some(a.to_lowercase() == b.to_lowercase()),
            _ => self.compare(other).map(|o| o == Ordering::Equal),
        }
    }
}

/// Parse an ISO-8601 date or date-time into a UTC instant.
///
/// A bare date is midnight UTC; a date-time without an offset is UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if !DATETIME_RE.is_match(raw) {
        return None;
    }

    let time = raw.get(10..)?;
    if time.is_empty() {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    let has_offset = raw.ends_with('Z') || time.contains(['+', '-']);
    let parsed = if has_offset {
        DateTime::parse_from_rfc3339(raw)
    } else {
        DateTime::parse_from_rfc3339(&format!("{}Z", raw))
    };
    parsed.ok().map(|dt| dt.with_timezone(&Utc))
}

/// Parse a plain decimal literal.
///
/// Literals without a fraction stay integers while they fit in an i64.
pub fn parse_number(raw: &str) -> Option<Number> {
    if !NUMBER_RE.is_match(raw) {
        return None;
    }
    if !raw.contains('.') {
        if let Ok(i) = raw.parse() {
            return Some(Number::Int(i));
        }
    }
    raw.parse().ok().map(Number::Float)
}
