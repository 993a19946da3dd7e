//! MaintenanceEvent entity - A fault report against an aircraft
//!
//! Events attach to all three levels of the onboard hierarchy:
//!
//! ```cypher
//! (event:MaintenanceEvent)-[:AFFECTS_AIRCRAFT]->(aircraft:Aircraft)
//! (event:MaintenanceEvent)-[:AFFECTS_SYSTEM]->(system:System)
//! (component:Component)-[:HAS_EVENT]->(event:MaintenanceEvent)
//! ```
//!
//! The HAS_EVENT edge points from the component so that fault attribution
//! queries start at the part, not at the report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::entities::Component;
use crate::error::DomainError;

/// Fault severity level.
///
/// The wire form is the exact uppercase string; severity filters in the store
/// are case-sensitive equality matches, never fuzzy or numeric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    /// The exact string stored on the node.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CRITICAL" => Ok(Self::Critical),
            "WARNING" => Ok(Self::Warning),
            other => Err(DomainError::parse(format!("Unknown severity: {other}"))),
        }
    }
}

/// A maintenance event or fault report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    /// Unique event identifier
    pub event_id: String,
    /// Affected aircraft id (denormalized; also an AFFECTS_AIRCRAFT edge)
    pub aircraft_id: String,
    /// Affected system id (denormalized; also an AFFECTS_SYSTEM edge)
    pub system_id: String,
    /// Affected component id (denormalized; also a HAS_EVENT edge)
    pub component_id: String,
    /// Fault description
    pub fault: String,
    pub severity: Severity,
    pub reported_at: DateTime<Utc>,
    /// Action taken
    pub corrective_action: String,
}

impl MaintenanceEvent {
    /// Create a validated maintenance event record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any text field is empty after
    /// trimming.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_id: impl Into<String>,
        aircraft_id: impl Into<String>,
        system_id: impl Into<String>,
        component_id: impl Into<String>,
        fault: impl Into<String>,
        severity: Severity,
        reported_at: DateTime<Utc>,
        corrective_action: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            event_id: require("event_id", event_id)?,
            aircraft_id: require("aircraft_id", aircraft_id)?,
            system_id: require("system_id", system_id)?,
            component_id: require("component_id", component_id)?,
            fault: require("fault", fault)?,
            severity,
            reported_at,
            corrective_action: require("corrective_action", corrective_action)?,
        })
    }
}

/// A component paired with one of its maintenance events, from the HAS_EVENT
/// edge. Used for missing/faulty component reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentFault {
    pub component: Component,
    pub event: MaintenanceEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_round_trips_exact_strings() {
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
        assert_eq!(
            Severity::from_str("CRITICAL").expect("parses"),
            Severity::Critical
        );
    }

    #[test]
    fn severity_parse_is_case_sensitive() {
        assert!(Severity::from_str("critical").is_err());
        assert!(Severity::from_str("Critical").is_err());
        assert!(Severity::from_str("SEVERE").is_err());
    }

    #[test]
    fn severity_serde_uses_wire_strings() {
        let json = serde_json::to_string(&Severity::Critical).expect("serializes");
        assert_eq!(json, "\"CRITICAL\"");
    }
}
