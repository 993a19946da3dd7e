//! Error taxonomy for the data-access layer.
//!
//! All driver errors are caught at the session/repository boundary and
//! re-wrapped as one of these kinds; the underlying cause is preserved in the
//! message for diagnostics but the driver's error type is never re-exported.

/// Data-access errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Endpoint unreachable, credentials rejected, or session requested
    /// before `connect()`.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Query execution failed - includes operation name for tracing.
    #[error("Query error in {operation}: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },

    /// Update targeting a key that does not exist. Lookups never produce
    /// this; absent is `None`.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl ClientError {
    /// Create a Connection error.
    pub fn connection(message: impl ToString) -> Self {
        Self::Connection {
            message: message.to_string(),
        }
    }

    /// Create a Query error with operation context.
    pub fn query(operation: &'static str, message: impl ToString) -> Self {
        Self::Query {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detectable() {
        let err = ClientError::not_found("Aircraft", "AC-001");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Aircraft not found: AC-001");

        let err = ClientError::query("create aircraft", "boom");
        assert!(!err.is_not_found());
    }

    #[test]
    fn query_error_carries_operation() {
        let err = ClientError::query("list flights", "connection reset");
        assert_eq!(
            err.to_string(),
            "Query error in list flights: connection reset"
        );
    }
}
