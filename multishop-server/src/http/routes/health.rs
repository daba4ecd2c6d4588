//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::Service;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
fn health(service: Service) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: service.name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>(service: Service) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(move || async move { health(service) }))
}
