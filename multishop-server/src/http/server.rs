//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use multishop_core::{ServerConfig, ShopConfig};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{schema, DbContext, StorageError};
use crate::discount::PgDiscountService;
use crate::order::{build_mediator, OrderRepositories};

/// Which microservice a process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Discount,
    Order,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::Order => "order",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connect, bootstrap the service's tables, serve until shutdown, then
/// close the database context.
///
/// # Example
///
/// ```ignore
/// let config = ShopConfig::load()?;
/// run_service(Service::Order, &config).await?;
/// ```
pub async fn run_service(service: Service, config: &ShopConfig) -> Result<(), ServerError> {
    let db = DbContext::connect(&config.database).await?;

    let app = match service {
        Service::Discount => {
            schema::ensure_discount_schema(&db).await?;
            routes::discount_app(Arc::new(PgDiscountService::new(db.clone())))
        }
        Service::Order => {
            schema::ensure_order_schema(&db).await?;
            let mediator = build_mediator(&OrderRepositories::postgres(&db));
            routes::order_app(Arc::new(mediator))
        }
    };

    tracing::info!(%service, "service starting");
    let served = serve(app, &config.server).await;
    db.close().await;
    served
}

/// Run `app` on the configured listener until a shutdown signal arrives.
pub async fn serve(app: Router, config: &ServerConfig) -> Result<(), ServerError> {
    let app = app
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http());

    // Bind listener
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Server listening on {}", config.bind);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    // Localhost only
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:3030"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:3030"),
        ])
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    #[test]
    fn service_names() {
        assert_eq!(Service::Discount.to_string(), "discount");
        assert_eq!(Service::Order.name(), "order");
    }

    #[tokio::test]
    async fn localhost_origin_is_allowed() {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(cors_layer(false));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn foreign_origin_gets_no_cors_header() {
        let app = Router::new()
            .route("/health", get(|| async { "ok" }))
            .layer(cors_layer(false));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
