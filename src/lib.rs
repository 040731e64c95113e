//! datatable - Filter, sort and paginate nested JSON records
//!
//! An in-memory record collection queried through a small expression
//! language, served over HTTP or from the command line.

pub mod cli;
pub mod dataset;
pub mod filter;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod record;
pub mod rest_api;
pub mod stats;
