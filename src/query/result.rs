//! Result types for query execution

use serde::Serialize;

use super::descriptor::PageRequest;
use crate::record::Record;

/// One page of matching records
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    /// Projected records in result order
    pub records: Vec<Record>,
    /// Records matching search and filters, before pagination
    pub total: usize,
    /// Page that produced this result, if any
    pub page: Option<PageRequest>,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Pagination summary, present when a page was requested
    pub fn pagination(&self) -> Option<Pagination> {
        self.page.map(|page| Pagination::new(page, self.total))
    }
}

/// Pagination summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: usize) -> Self {
        let limit = request.limit.get();
        Self {
            page: request.page.get(),
            limit,
            total,
            pages: total.div_ceil(limit),
            has_next: request.end() < total,
            has_prev: request.page.get() > 1,
        }
    }
}
