//! # REST API Handler
//!
//! Translates parsed requests into engine queries and report lookups over the
//! loaded dataset.

use std::sync::Arc;

use super::errors::{RestError, RestResult};
use super::parser::QueryParams;
use super::response::{CategoryColumnsResponse, ColumnsResponse, DataResponse};
use crate::dataset::Dataset;
use crate::observability::{Event, Logger};
use crate::query::QueryEngine;
use crate::record::{ColumnCategory, Record};
use crate::stats::{CityReport, CompanyReport, DatasetStats, StatsSummary};

/// REST handler trait for the data, column and stats endpoints
pub trait RestHandler: Send + Sync {
    /// Run a query
    fn query(&self, params: &QueryParams) -> RestResult<DataResponse>;

    /// Get a single record by ID
    fn get(&self, id: i64) -> RestResult<Record>;

    /// Full column catalog
    fn columns(&self) -> ColumnsResponse;

    /// Columns of one category
    fn category(&self, name: &str) -> RestResult<CategoryColumnsResponse>;

    fn stats(&self) -> DatasetStats;

    fn summary(&self) -> StatsSummary;

    fn cities(&self) -> CityReport;

    fn companies(&self) -> CompanyReport;

    /// Search shortcut; an empty term yields an empty response
    fn search(&self, term: &str, params: &QueryParams) -> RestResult<DataResponse> {
        if term.is_empty() {
            return Ok(DataResponse::empty(params.format));
        }
        let params = QueryParams {
            columns: params.columns.clone(),
            search: Some(term.to_string()),
            format: params.format,
            ..Default::default()
        };
        self.query(&params)
    }
}

/// Page-size limits applied to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Handler over an in-memory dataset
pub struct DatasetHandler {
    dataset: Arc<Dataset>,
    limits: Limits,
}

impl DatasetHandler {
    pub fn new(dataset: Arc<Dataset>, limits: Limits) -> Self {
        Self { dataset, limits }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl RestHandler for DatasetHandler {
    fn query(&self, params: &QueryParams) -> RestResult<DataResponse> {
        let descriptor =
            params.to_descriptor(self.limits.default_limit, self.limits.max_limit)?;
        let page = QueryEngine::run(self.dataset.records(), &descriptor);

        Logger::event(
            Event::QueryExecuted,
            &[
                ("total", &page.total.to_string()),
                ("returned", &page.len().to_string()),
                ("filters", &descriptor.filters.len().to_string()),
                ("sort_keys", &descriptor.sort.len().to_string()),
                ("format", descriptor.format.as_str()),
            ],
        );

        Ok(DataResponse::from_page(
            page,
            params.echoed_columns(),
            params.format,
        ))
    }

    fn get(&self, id: i64) -> RestResult<Record> {
        match self.dataset.find_by_id(id) {
            Some(record) => Ok(record.clone()),
            None => {
                Logger::event(Event::RecordNotFound, &[("id", &id.to_string())]);
                Err(RestError::RecordNotFound(id))
            }
        }
    }

    fn columns(&self) -> ColumnsResponse {
        ColumnsResponse::new()
    }

    fn category(&self, name: &str) -> RestResult<CategoryColumnsResponse> {
        let category: ColumnCategory = name
            .parse()
            .map_err(|_| RestError::UnknownCategory(name.to_string()))?;
        Ok(CategoryColumnsResponse::new(category))
    }

    fn stats(&self) -> DatasetStats {
        DatasetStats::compute(self.dataset.records())
    }

    fn summary(&self) -> StatsSummary {
        StatsSummary::compute(self.dataset.records())
    }

    fn cities(&self) -> CityReport {
        CityReport::compute(self.dataset.records())
    }

    fn companies(&self) -> CompanyReport {
        CompanyReport::compute(self.dataset.records())
    }
}
