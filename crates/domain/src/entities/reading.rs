//! Reading entity - A time-series sensor sample
//!
//! Readings reference their sensor by property only; they are high-volume and
//! carry no edge in the graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// A single sensor reading at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Unique reading identifier
    pub reading_id: String,
    /// Parent sensor id (property reference only, no edge)
    pub sensor_id: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Reading {
    /// Create a validated reading record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if an id field is empty after trimming.
    pub fn new(
        reading_id: impl Into<String>,
        sensor_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        value: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            reading_id: require("reading_id", reading_id)?,
            sensor_id: require("sensor_id", sensor_id)?,
            timestamp,
            value,
        })
    }
}
