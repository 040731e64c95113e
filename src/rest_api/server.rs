//! # REST API HTTP Server
//!
//! Axum routes for the data, column and stats endpoints. Every collection
//! route answers with and without a trailing slash.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::errors::{RestError, RestResult};
use super::handler::RestHandler;
use super::parser::{DataRequest, QueryParams};
use super::response::{CategoryColumnsResponse, ColumnsResponse, DataResponse};
use crate::observability::{Event, Logger};
use crate::record::Record;
use crate::stats::{CityReport, CompanyReport, DatasetStats, StatsSummary};

/// REST API server state
pub struct RestServer<H: RestHandler> {
    handler: Arc<H>,
}

impl<H: RestHandler + 'static> RestServer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/api/data", get(list_handler::<H>).post(query_handler::<H>))
            .route("/api/data/", get(list_handler::<H>).post(query_handler::<H>))
            .route("/api/data/search", get(search_handler::<H>))
            .route("/api/data/search/", get(search_handler::<H>))
            .route("/api/data/:id", get(get_handler::<H>))
            .route("/api/columns", get(columns_handler::<H>))
            .route("/api/columns/", get(columns_handler::<H>))
            .route("/api/columns/:category", get(category_handler::<H>))
            .route("/api/stats", get(stats_handler::<H>))
            .route("/api/stats/", get(stats_handler::<H>))
            .route("/api/stats/summary", get(summary_handler::<H>))
            .route("/api/stats/cities", get(cities_handler::<H>))
            .route("/api/stats/companies", get(companies_handler::<H>))
            .with_state(state)
    }
}

/// Shared state type
type ServerState<H> = Arc<RestServer<H>>;

/// Log a rejected request and pass the error through
fn rejected(err: RestError) -> RestError {
    Logger::event(
        Event::QueryRejected,
        &[
            ("code", &err.status_code().as_u16().to_string()),
            ("reason", &err.to_string()),
        ],
    );
    err
}

/// Query via URL parameters
async fn list_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Query(query): Query<HashMap<String, String>>,
) -> RestResult<Json<DataResponse>> {
    let params = QueryParams::parse(&query).map_err(rejected)?;
    let response = server.handler.query(&params).map_err(rejected)?;
    Ok(Json(response))
}

/// Query via JSON body
async fn query_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Json(body): Json<DataRequest>,
) -> RestResult<Json<DataResponse>> {
    let params = QueryParams::try_from(body).map_err(rejected)?;
    let response = server.handler.query(&params).map_err(rejected)?;
    Ok(Json(response))
}

/// Free-text search shortcut (`q`, `columns`, `format`)
async fn search_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Query(mut query): Query<HashMap<String, String>>,
) -> RestResult<Json<DataResponse>> {
    let term = query.remove("q").unwrap_or_default();
    query.retain(|key, _| key == "columns" || key == "format");
    let params = QueryParams::parse(&query).map_err(rejected)?;
    let response = server.handler.search(&term, &params).map_err(rejected)?;
    Ok(Json(response))
}

/// Get single record handler
async fn get_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path(id): Path<String>,
) -> RestResult<Json<Record>> {
    let id: i64 = id
        .parse()
        .map_err(|_| rejected(RestError::InvalidQueryParam(format!("Invalid id: {}", id))))?;
    let record = server.handler.get(id)?;
    Ok(Json(record))
}

async fn columns_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Json<ColumnsResponse> {
    Json(server.handler.columns())
}

async fn category_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
    Path(category): Path<String>,
) -> RestResult<Json<CategoryColumnsResponse>> {
    let response = server.handler.category(&category).map_err(rejected)?;
    Ok(Json(response))
}

async fn stats_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Json<DatasetStats> {
    Json(server.handler.stats())
}

async fn summary_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Json<StatsSummary> {
    Json(server.handler.summary())
}

async fn cities_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Json<CityReport> {
    Json(server.handler.cities())
}

async fn companies_handler<H: RestHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Json<CompanyReport> {
    Json(server.handler.companies())
}
