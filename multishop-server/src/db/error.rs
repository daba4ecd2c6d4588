//! Storage error taxonomy
//!
//! Absence is never an error here: read paths return `Option`.

use sqlx::error::ErrorKind;

/// Error raised by any statement against the relational store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Store unreachable: pool exhausted or closed, I/O, TLS, bad connection settings
    #[error("store unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    /// Statement rejected by a unique, foreign-key, not-null or check constraint
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        constraint: Option<String>,
        message: String,
    },

    /// Any other statement failure, including row decoding
    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),

    /// No generated keys left for this resource
    #[error("no keys left for {resource}")]
    KeyspaceExhausted { resource: &'static str },
}

impl StorageError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db)
                if matches!(
                    db.kind(),
                    ErrorKind::UniqueViolation
                        | ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation
                ) =>
            {
                Self::ConstraintViolation {
                    constraint: db.constraint().map(str::to_owned),
                    message: db.message().to_owned(),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            other => Self::Query(other),
        }
    }
}
