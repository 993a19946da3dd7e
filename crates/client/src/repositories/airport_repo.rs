//! Airport repository.

use aerograph_domain::Airport;
use neo4rs::query;

use super::helpers::{node, node_to_airport};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Airport nodes.
pub struct AirportRepo {
    session: Session,
}

impl AirportRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert an airport by its unique key and return the persisted record.
    pub async fn create(&self, airport: &Airport) -> Result<Airport, ClientError> {
        let q = query(
            "MERGE (a:Airport {airport_id: $airport_id})
            SET a.iata = $iata,
                a.icao = $icao,
                a.name = $name,
                a.city = $city,
                a.country = $country,
                a.lat = $lat,
                a.lon = $lon
            RETURN a",
        )
        .param("airport_id", airport.airport_id.clone())
        .param("iata", airport.iata.clone())
        .param("icao", airport.icao.clone())
        .param("name", airport.name.clone())
        .param("city", airport.city.clone())
        .param("country", airport.country.clone())
        .param("lat", airport.lat)
        .param("lon", airport.lon);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create airport", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create airport", e))?
        {
            Some(row) => node_to_airport(&node(&row, "a")?),
            None => Err(ClientError::query(
                "create airport",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get an airport by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, airport_id: &str) -> Result<Option<Airport>, ClientError> {
        let q = query("MATCH (a:Airport {airport_id: $airport_id}) RETURN a")
            .param("airport_id", airport_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find airport", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find airport", e))?
        {
            Ok(Some(node_to_airport(&node(&row, "a")?)?))
        } else {
            Ok(None)
        }
    }

    /// Get an airport by IATA code (e.g., LAX).
    pub async fn find_by_iata(&self, iata: &str) -> Result<Option<Airport>, ClientError> {
        let q = query("MATCH (a:Airport {iata: $iata}) RETURN a").param("iata", iata.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find airport", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find airport", e))?
        {
            Ok(Some(node_to_airport(&node(&row, "a")?)?))
        } else {
            Ok(None)
        }
    }

    /// Get an airport by ICAO code (e.g., KLAX).
    pub async fn find_by_icao(&self, icao: &str) -> Result<Option<Airport>, ClientError> {
        let q = query("MATCH (a:Airport {icao: $icao}) RETURN a").param("icao", icao.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find airport", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find airport", e))?
        {
            Ok(Some(node_to_airport(&node(&row, "a")?)?))
        } else {
            Ok(None)
        }
    }

    /// List airports ordered by IATA code, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Airport>, ClientError> {
        let q = query(
            "MATCH (a:Airport)
            RETURN a
            ORDER BY a.iata
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list airports", e))?;
        let mut airports = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list airports", e))?
        {
            airports.push(node_to_airport(&node(&row, "a")?)?);
        }

        Ok(airports)
    }

    /// Update an existing airport, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no airport has this key.
    pub async fn update(&self, airport: &Airport) -> Result<Airport, ClientError> {
        let q = query(
            "MATCH (a:Airport {airport_id: $airport_id})
            SET a.iata = $iata,
                a.icao = $icao,
                a.name = $name,
                a.city = $city,
                a.country = $country,
                a.lat = $lat,
                a.lon = $lon
            RETURN a",
        )
        .param("airport_id", airport.airport_id.clone())
        .param("iata", airport.iata.clone())
        .param("icao", airport.icao.clone())
        .param("name", airport.name.clone())
        .param("city", airport.city.clone())
        .param("country", airport.country.clone())
        .param("lat", airport.lat)
        .param("lon", airport.lon);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update airport", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update airport", e))?
        {
            Some(row) => node_to_airport(&node(&row, "a")?),
            None => Err(ClientError::not_found("Airport", &airport.airport_id)),
        }
    }

    /// Delete an airport and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, airport_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (a:Airport {airport_id: $airport_id})
            DETACH DELETE a
            RETURN count(a) AS deleted",
        )
        .param("airport_id", airport_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete airport", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete airport", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete airport", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted airport: {}", airport_id);
        }
        Ok(deleted)
    }
}
