//! Deserialization helpers for row-to-entity conversion.
//!
//! Extension methods over `neo4rs::Node` plus one mapping function per entity.
//! Every getter is strict: a missing or mistyped field fails fast as
//! `ClientError::Query` instead of producing a partially-populated entity.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use neo4rs::{Node, Row};

use aerograph_domain::{
    Aircraft, Airport, Component, Delay, Flight, MaintenanceEvent, Reading, Sensor, Severity,
    System,
};

use crate::error::ClientError;

/// Serialize a timestamp into its store representation: fixed-width RFC 3339
/// UTC (`YYYY-MM-DDThh:mm:ssZ`). Lexicographic order of these strings is
/// chronological order, which the ORDER BY clauses rely on.
pub(crate) fn datetime_to_store(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Get the node bound to `column` out of a result row.
pub(crate) fn node(row: &Row, column: &str) -> Result<Node, ClientError> {
    row.get(column).map_err(|e| {
        ClientError::query(
            "query",
            format!("Missing node column '{column}': {e}"),
        )
    })
}

/// Strict field access on Neo4j nodes.
pub(crate) trait NodeExt {
    /// Get a required string field.
    fn get_string(&self, field: &str) -> Result<String, ClientError>;

    /// Get a required float field.
    fn get_f64(&self, field: &str) -> Result<f64, ClientError>;

    /// Get a required non-negative integer field.
    fn get_minutes(&self, field: &str) -> Result<u32, ClientError>;

    /// Get a required timestamp field stored as RFC 3339.
    fn get_datetime(&self, field: &str) -> Result<DateTime<Utc>, ClientError>;

    /// Get a required severity field stored as its exact wire string.
    fn get_severity(&self, field: &str) -> Result<Severity, ClientError>;
}

impl NodeExt for Node {
    fn get_string(&self, field: &str) -> Result<String, ClientError> {
        self.get(field).map_err(|e| {
            ClientError::query(
                "query",
                format!("Missing required field '{field}': {e}"),
            )
        })
    }

    fn get_f64(&self, field: &str) -> Result<f64, ClientError> {
        self.get(field).map_err(|e| {
            ClientError::query(
                "query",
                format!("Missing required field '{field}': {e}"),
            )
        })
    }

    fn get_minutes(&self, field: &str) -> Result<u32, ClientError> {
        let n: i64 = self.get(field).map_err(|e| {
            ClientError::query(
                "query",
                format!("Missing required field '{field}': {e}"),
            )
        })?;
        u32::try_from(n).map_err(|_| {
            ClientError::query(
                "parse",
                format!("Field '{field}' must be a non-negative integer, got {n}"),
            )
        })
    }

    fn get_datetime(&self, field: &str) -> Result<DateTime<Utc>, ClientError> {
        let s: String = self.get_string(field)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                ClientError::query(
                    "parse",
                    format!("Invalid datetime in field '{field}': {e} (value: '{s}')"),
                )
            })
    }

    fn get_severity(&self, field: &str) -> Result<Severity, ClientError> {
        let s: String = self.get_string(field)?;
        Severity::from_str(&s).map_err(|e| {
            ClientError::query(
                "parse",
                format!("Invalid severity in field '{field}': {e}"),
            )
        })
    }
}

pub(crate) fn node_to_aircraft(node: &Node) -> Result<Aircraft, ClientError> {
    Ok(Aircraft {
        aircraft_id: node.get_string("aircraft_id")?,
        tail_number: node.get_string("tail_number")?,
        icao24: node.get_string("icao24")?,
        model: node.get_string("model")?,
        operator: node.get_string("operator")?,
        manufacturer: node.get_string("manufacturer")?,
    })
}

pub(crate) fn node_to_airport(node: &Node) -> Result<Airport, ClientError> {
    Ok(Airport {
        airport_id: node.get_string("airport_id")?,
        iata: node.get_string("iata")?,
        icao: node.get_string("icao")?,
        name: node.get_string("name")?,
        city: node.get_string("city")?,
        country: node.get_string("country")?,
        lat: node.get_f64("lat")?,
        lon: node.get_f64("lon")?,
    })
}

pub(crate) fn node_to_flight(node: &Node) -> Result<Flight, ClientError> {
    Ok(Flight {
        flight_id: node.get_string("flight_id")?,
        flight_number: node.get_string("flight_number")?,
        aircraft_id: node.get_string("aircraft_id")?,
        operator: node.get_string("operator")?,
        origin: node.get_string("origin")?,
        destination: node.get_string("destination")?,
        scheduled_departure: node.get_datetime("scheduled_departure")?,
        scheduled_arrival: node.get_datetime("scheduled_arrival")?,
    })
}

pub(crate) fn node_to_system(node: &Node) -> Result<System, ClientError> {
    Ok(System {
        system_id: node.get_string("system_id")?,
        aircraft_id: node.get_string("aircraft_id")?,
        name: node.get_string("name")?,
        r#type: node.get_string("type")?,
    })
}

pub(crate) fn node_to_component(node: &Node) -> Result<Component, ClientError> {
    Ok(Component {
        component_id: node.get_string("component_id")?,
        system_id: node.get_string("system_id")?,
        name: node.get_string("name")?,
        r#type: node.get_string("type")?,
    })
}

pub(crate) fn node_to_sensor(node: &Node) -> Result<Sensor, ClientError> {
    Ok(Sensor {
        sensor_id: node.get_string("sensor_id")?,
        system_id: node.get_string("system_id")?,
        name: node.get_string("name")?,
        r#type: node.get_string("type")?,
        unit: node.get_string("unit")?,
    })
}

pub(crate) fn node_to_reading(node: &Node) -> Result<Reading, ClientError> {
    Ok(Reading {
        reading_id: node.get_string("reading_id")?,
        sensor_id: node.get_string("sensor_id")?,
        timestamp: node.get_datetime("timestamp")?,
        value: node.get_f64("value")?,
    })
}

pub(crate) fn node_to_event(node: &Node) -> Result<MaintenanceEvent, ClientError> {
    Ok(MaintenanceEvent {
        event_id: node.get_string("event_id")?,
        aircraft_id: node.get_string("aircraft_id")?,
        system_id: node.get_string("system_id")?,
        component_id: node.get_string("component_id")?,
        fault: node.get_string("fault")?,
        severity: node.get_severity("severity")?,
        reported_at: node.get_datetime("reported_at")?,
        corrective_action: node.get_string("corrective_action")?,
    })
}

pub(crate) fn node_to_delay(node: &Node) -> Result<Delay, ClientError> {
    Ok(Delay {
        delay_id: node.get_string("delay_id")?,
        flight_id: node.get_string("flight_id")?,
        cause: node.get_string("cause")?,
        minutes: node.get_minutes("minutes")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn store_timestamps_are_fixed_width_utc() {
        let ts = Utc
            .with_ymd_and_hms(2024, 3, 7, 9, 5, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(datetime_to_store(&ts), "2024-03-07T09:05:00Z");

        // Fixed width means lexicographic comparisons sort chronologically.
        let later = Utc
            .with_ymd_and_hms(2024, 3, 7, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        assert!(datetime_to_store(&ts) < datetime_to_store(&later));
    }
}
