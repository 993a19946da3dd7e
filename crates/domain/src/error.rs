//! Unified error type for the domain layer.

use thiserror::Error;

/// Error type for entity construction and value parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty key field, out-of-range coordinate)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for enumerated values)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for constructor invariant violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error for an unrecognized enumerated value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
