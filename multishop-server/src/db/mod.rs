//! Database layer - connection context, error taxonomy and schema bootstrap
//!
//! - One `DbContext` per process, created at service start and closed at shutdown
//! - Every operation acquires its own pooled connection and drops it on exit
//! - No explicit transactions: each statement is its own unit of work

pub mod error;
pub mod keys;
pub mod pool;
pub mod schema;

pub use error::StorageError;
pub use pool::DbContext;
