//! multishop-core: configuration and error types shared by the
//! discount and order services.

pub mod config;
pub mod error;

pub use config::{DatabaseConfig, ServerConfig, ShopConfig};
pub use error::{CoreError, Result};
