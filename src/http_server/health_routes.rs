//! Health HTTP Routes
//!
//! Service status at `/` and `/health`.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Endpoint index advertised by the status response
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub data: &'static str,
    pub columns: &'static str,
    pub stats: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: "datatable",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: Endpoints {
                data: "/api/data/",
                columns: "/api/columns/",
                stats: "/api/stats/",
            },
        }
    }
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::healthy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let json = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["endpoints"]["data"], "/api/data/");
    }
}
