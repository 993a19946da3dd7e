//! Airport entity - A destination node with location and identifier codes

use serde::{Deserialize, Serialize};

use crate::common::require;
use crate::error::DomainError;

/// An airport with IATA/ICAO codes and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Unique airport identifier
    pub airport_id: String,
    /// IATA code (e.g., LAX)
    pub iata: String,
    /// ICAO code (e.g., KLAX)
    pub icao: String,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Latitude in degrees, [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, [-180, 180]
    pub lon: f64,
}

impl Airport {
    /// Create a validated airport record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any text field is empty after
    /// trimming, or coordinates fall outside their valid ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        airport_id: impl Into<String>,
        iata: impl Into<String>,
        icao: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::validation(format!(
                "lat must be within [-90, 90], got {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::validation(format!(
                "lon must be within [-180, 180], got {lon}"
            )));
        }
        Ok(Self {
            airport_id: require("airport_id", airport_id)?,
            iata: require("iata", iata)?,
            icao: require("icao", icao)?,
            name: require("name", name)?,
            city: require("city", city)?,
            country: require("country", country)?,
            lat,
            lon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range_coordinates() {
        let result = Airport::new(
            "AP-LAX", "LAX", "KLAX", "Los Angeles Intl", "Los Angeles", "USA", 120.0, -118.4,
        );
        assert!(result.is_err());

        let result = Airport::new(
            "AP-LAX", "LAX", "KLAX", "Los Angeles Intl", "Los Angeles", "USA", 33.9, -200.0,
        );
        assert!(result.is_err());
    }
}
