//! # HTTP Server
//!
//! Combines the health and REST routers behind one CORS layer.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::ServerConfig;
use super::health_routes::health_routes;
use crate::dataset::Dataset;
use crate::observability::{Event, Logger};
use crate::rest_api::{DatasetHandler, Limits, RestServer};

/// HTTP server over one loaded dataset
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for `dataset` with the given configuration
    pub fn new(config: ServerConfig, dataset: Arc<Dataset>) -> Self {
        let router = Self::build_router(&config, dataset);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, dataset: Arc<Dataset>) -> Router {
        let limits = Limits {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        };
        let rest = RestServer::new(DatasetHandler::new(dataset, limits));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(rest.router())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;

        Logger::event(
            Event::Serving,
            &[
                ("addr", &addr.to_string()),
                ("data_file", &self.config.data_file.display().to_string()),
            ],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
