//! Sensor entity - A monitoring point on an onboard system

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// A sensor attached to a system via HAS_SENSOR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Unique sensor identifier
    pub sensor_id: String,
    /// Parent system id (denormalized; also a HAS_SENSOR edge)
    pub system_id: String,
    pub name: String,
    /// Sensor type (e.g., "temperature", "pressure")
    pub r#type: String,
    /// Measurement unit (e.g., "celsius", "psi")
    pub unit: String,
}

impl Sensor {
    /// Create a validated sensor record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any field is empty after trimming.
    pub fn new(
        sensor_id: impl Into<String>,
        system_id: impl Into<String>,
        name: impl Into<String>,
        r#type: impl Into<String>,
        unit: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            sensor_id: require("sensor_id", sensor_id)?,
            system_id: require("system_id", system_id)?,
            name: require("name", name)?,
            r#type: require("type", r#type)?,
            unit: require("unit", unit)?,
        })
    }
}
