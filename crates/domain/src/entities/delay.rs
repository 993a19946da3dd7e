//! Delay entity - A delay incident attached to a flight

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::entities::Flight;
use crate::error::DomainError;

/// A flight delay incident, attached via HAS_DELAY.
///
/// `minutes` is non-negative by construction; the store persists it as an
/// integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    /// Unique delay identifier
    pub delay_id: String,
    /// Affected flight id (denormalized; also a HAS_DELAY edge)
    pub flight_id: String,
    /// Delay cause (e.g., "weather", "technical")
    pub cause: String,
    /// Delay duration in minutes
    pub minutes: u32,
}

impl Delay {
    /// Create a validated delay record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any text field is empty after
    /// trimming.
    pub fn new(
        delay_id: impl Into<String>,
        flight_id: impl Into<String>,
        cause: impl Into<String>,
        minutes: u32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            delay_id: require("delay_id", delay_id)?,
            flight_id: require("flight_id", flight_id)?,
            cause: require("cause", cause)?,
            minutes,
        })
    }
}

/// A flight paired with one of its delays, from the HAS_DELAY edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayedFlight {
    pub flight: Flight,
    pub delay: Delay,
}
