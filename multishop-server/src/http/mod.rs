//! HTTP layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing
//! - Graceful shutdown, after which the database context is closed
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{discount_app, order_app};
pub use server::{run_service, serve, ServerError, Service};
