//! Validation error types for request input at the HTTP boundary

use std::fmt;

#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Value doesn't match the required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body is not valid JSON for the expected shape
    Body { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Body { reason } => write!(f, "request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
