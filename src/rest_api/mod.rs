//! # REST API Module
//!
//! HTTP endpoints over the loaded dataset: the flexible data query, record
//! lookup, search shortcut, column catalog and dataset statistics.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{RestError, RestResult};
pub use handler::{DatasetHandler, Limits, RestHandler};
pub use parser::{parse_filters, DataRequest, QueryParams};
pub use response::{CategoryColumnsResponse, ColumnsResponse, DataResponse};
pub use server::RestServer;
