//! System entity - A major onboard system (hydraulics, avionics, engines)

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// A major aircraft system, parented to one aircraft via HAS_SYSTEM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    /// Unique system identifier
    pub system_id: String,
    /// Parent aircraft id (denormalized; also a HAS_SYSTEM edge)
    pub aircraft_id: String,
    pub name: String,
    /// System type (e.g., "hydraulic", "avionics")
    pub r#type: String,
}

impl System {
    /// Create a validated system record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any field is empty after trimming.
    pub fn new(
        system_id: impl Into<String>,
        aircraft_id: impl Into<String>,
        name: impl Into<String>,
        r#type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            system_id: require("system_id", system_id)?,
            aircraft_id: require("aircraft_id", aircraft_id)?,
            name: require("name", name)?,
            r#type: require("type", r#type)?,
        })
    }
}
