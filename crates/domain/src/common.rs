//! Shared validation helpers for entity constructors.

use crate::error::DomainError;

/// Validate a required string field: trimmed, non-empty.
pub(crate) fn require(field: &'static str, value: impl Into<String>) -> Result<String, DomainError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_trims_whitespace() {
        let value = require("tail_number", "  N12345 ").expect("valid field");
        assert_eq!(value, "N12345");
    }

    #[test]
    fn require_rejects_empty_and_blank() {
        assert!(require("aircraft_id", "").is_err());
        assert!(require("aircraft_id", "   ").is_err());
    }
}
