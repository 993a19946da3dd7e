//! Aircraft entity - An airframe in the fleet
//!
//! Aircraft are the roots of the onboard hierarchy:
//!
//! ```cypher
//! (aircraft:Aircraft)-[:OPERATES_FLIGHT]->(flight:Flight)
//! (aircraft:Aircraft)-[:HAS_SYSTEM]->(system:System)
//! ```

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// A commercial aircraft in the fleet.
///
/// Data-carrying struct with public fields; the only invariant is that every
/// field is non-empty, enforced on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Unique aircraft identifier
    pub aircraft_id: String,
    /// Registration/tail number (e.g., N12345)
    pub tail_number: String,
    /// ICAO 24-bit transponder address
    pub icao24: String,
    /// Airframe model (e.g., Boeing 737-800)
    pub model: String,
    /// Operating airline
    pub operator: String,
    /// Airframe manufacturer
    pub manufacturer: String,
}

impl Aircraft {
    /// Create a validated aircraft record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any field is empty after trimming.
    pub fn new(
        aircraft_id: impl Into<String>,
        tail_number: impl Into<String>,
        icao24: impl Into<String>,
        model: impl Into<String>,
        operator: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            aircraft_id: require("aircraft_id", aircraft_id)?,
            tail_number: require("tail_number", tail_number)?,
            icao24: require("icao24", icao24)?,
            model: require("model", model)?,
            operator: require("operator", operator)?,
            manufacturer: require("manufacturer", manufacturer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_key() {
        let result = Aircraft::new("", "N12345", "A1B2C3", "737-800", "Test Air", "Boeing");
        assert!(result.is_err());
    }

    #[test]
    fn new_trims_fields() {
        let aircraft = Aircraft::new(
            " AC-001 ",
            "N12345",
            "A1B2C3",
            "737-800",
            "Test Air",
            "Boeing",
        )
        .expect("valid aircraft");
        assert_eq!(aircraft.aircraft_id, "AC-001");
    }
}
