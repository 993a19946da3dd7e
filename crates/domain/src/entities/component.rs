//! Component entity - A part within an onboard system

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// A component within an aircraft system, parented via HAS_COMPONENT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique component identifier
    pub component_id: String,
    /// Parent system id (denormalized; also a HAS_COMPONENT edge)
    pub system_id: String,
    pub name: String,
    /// Component type (e.g., "pump", "valve")
    pub r#type: String,
}

impl Component {
    /// Create a validated component record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any field is empty after trimming.
    pub fn new(
        component_id: impl Into<String>,
        system_id: impl Into<String>,
        name: impl Into<String>,
        r#type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            component_id: require("component_id", component_id)?,
            system_id: require("system_id", system_id)?,
            name: require("name", name)?,
            r#type: require("type", r#type)?,
        })
    }
}
