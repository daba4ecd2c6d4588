//! multishop-server: discount and order microservices
//!
//! - `db`: connection context, storage errors, table bootstrap
//! - `models`: coupon DTOs and order entities
//! - `discount`: coupon CRUD as direct parameterized statements
//! - `order`: commands and queries dispatched by a mediator over a generic repository
//! - `http`: axum routers and the server runtime for both services

pub mod db;
pub mod discount;
pub mod http;
pub mod models;
pub mod order;

pub use db::{DbContext, StorageError};
pub use http::{run_service, ServerError, Service};
