//! # HTTP Server Module
//!
//! Serves the dataset over HTTP with axum.
//!
//! # Endpoints
//!
//! - `/`, `/health` - Service status
//! - `/api/data/*` - Query, lookup and search
//! - `/api/columns/*` - Column catalog
//! - `/api/stats/*` - Dataset statistics

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::HttpServer;
