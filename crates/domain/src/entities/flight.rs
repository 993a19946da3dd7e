//! Flight entity - A scheduled flight operation
//!
//! Flights carry their operating aircraft id as a node property *and* as an
//! edge; both are written together on ingest, and the property form exists for
//! data ingested before its aircraft node:
//!
//! ```cypher
//! (aircraft:Aircraft)-[:OPERATES_FLIGHT]->(flight:Flight)
//! (flight:Flight)-[:ARRIVES_AT]->(airport:Airport)
//! (flight:Flight)-[:HAS_DELAY]->(delay:Delay)
//! ```
//!
//! Schedule timestamps are UTC and persist as fixed-width RFC 3339 strings so
//! that string ordering in the store is chronological ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::entities::Airport;
use crate::error::DomainError;

/// A scheduled flight operated by one aircraft between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight identifier
    pub flight_id: String,
    /// Published flight number (e.g., AA100)
    pub flight_number: String,
    /// Operating aircraft id (denormalized; also an OPERATES_FLIGHT edge)
    pub aircraft_id: String,
    /// Operating airline
    pub operator: String,
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport IATA code
    pub destination: String,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
}

impl Flight {
    /// Create a validated flight record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any text field is empty after
    /// trimming.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flight_id: impl Into<String>,
        flight_number: impl Into<String>,
        aircraft_id: impl Into<String>,
        operator: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        scheduled_departure: DateTime<Utc>,
        scheduled_arrival: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            flight_id: require("flight_id", flight_id)?,
            flight_number: require("flight_number", flight_number)?,
            aircraft_id: require("aircraft_id", aircraft_id)?,
            operator: require("operator", operator)?,
            origin: require("origin", origin)?,
            destination: require("destination", destination)?,
            scheduled_departure,
            scheduled_arrival,
        })
    }
}

/// A flight paired with its destination airport, from the ARRIVES_AT edge.
///
/// Both sides keep their full field sets; nothing is flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightArrival {
    pub flight: Flight,
    pub destination: Airport,
}
