//! Query descriptor
//!
//! Everything one query call needs: projection, search term, per-column
//! filters, sort keys, page request and output format.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Columns to return
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    Columns(Vec<String>),
}

/// Output shape of result records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single-level keys via the flat-key table
    Flat,
    /// Original nesting, pruned to the projection
    #[default]
    Nested,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Flat => "flat",
            OutputFormat::Nested => "nested",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(OutputFormat::Flat),
            "nested" => Ok(OutputFormat::Nested),
            other => Err(format!("Invalid format: {} (expected flat or nested)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// One sort key; earlier keys take precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub path: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: NonZeroUsize,
    pub limit: NonZeroUsize,
}

impl PageRequest {
    pub fn new(page: NonZeroUsize, limit: NonZeroUsize) -> Self {
        Self { page, limit }
    }

    /// Build from plain integers; `None` if either is zero
    pub fn from_numbers(page: usize, limit: usize) -> Option<Self> {
        Some(Self::new(NonZeroUsize::new(page)?, NonZeroUsize::new(limit)?))
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> usize {
        (self.page.get() - 1).saturating_mul(self.limit.get())
    }

    /// Index one past the last record on this page
    pub fn end(&self) -> usize {
        self.offset().saturating_add(self.limit.get())
    }
}

/// A full query request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub projection: Projection,
    pub search: String,
    /// Field path to raw filter expression
    pub filters: BTreeMap<String, String>,
    pub sort: Vec<SortKey>,
    /// `None` returns every matching record
    pub page: Option<PageRequest>,
    pub format: OutputFormat,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = Projection::Columns(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Add a column filter; a later filter on the same path replaces it
    pub fn with_filter(mut self, path: impl Into<String>, expression: impl Into<String>) -> Self {
        self.filters.insert(path.into(), expression.into());
        self
    }

    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
