//! Order service errors

use crate::db::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Store failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A by-id query found no entity
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("no handler registered for {0}")]
    HandlerNotRegistered(&'static str),
}

impl OrderError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }
}
