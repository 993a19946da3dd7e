//! Reading repository.
//!
//! Readings are high-volume time-series rows; they reference their sensor by
//! property only and every listing is bounded.

use aerograph_domain::Reading;
use neo4rs::query;

use super::helpers::{datetime_to_store, node, node_to_reading};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Reading nodes.
pub struct ReadingRepo {
    session: Session,
}

impl ReadingRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a reading by its unique key and return the persisted record.
    pub async fn create(&self, reading: &Reading) -> Result<Reading, ClientError> {
        let q = query(
            "MERGE (r:Reading {reading_id: $reading_id})
            SET r.sensor_id = $sensor_id,
                r.timestamp = $timestamp,
                r.value = $value
            RETURN r",
        )
        .param("reading_id", reading.reading_id.clone())
        .param("sensor_id", reading.sensor_id.clone())
        .param("timestamp", datetime_to_store(&reading.timestamp))
        .param("value", reading.value);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create reading", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create reading", e))?
        {
            Some(row) => node_to_reading(&node(&row, "r")?),
            None => Err(ClientError::query(
                "create reading",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a reading by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, reading_id: &str) -> Result<Option<Reading>, ClientError> {
        let q = query("MATCH (r:Reading {reading_id: $reading_id}) RETURN r")
            .param("reading_id", reading_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find reading", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find reading", e))?
        {
            Ok(Some(node_to_reading(&node(&row, "r")?)?))
        } else {
            Ok(None)
        }
    }

    /// List readings, most recent first, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Reading>, ClientError> {
        let q = query(
            "MATCH (r:Reading)
            RETURN r
            ORDER BY r.timestamp DESC
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list readings", e))?;
        let mut readings = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list readings", e))?
        {
            readings.push(node_to_reading(&node(&row, "r")?)?);
        }

        Ok(readings)
    }

    /// Readings from one sensor, most recent first, bounded by `limit`.
    /// Matched on the `sensor_id` property; readings carry no edge.
    pub async fn find_by_sensor(
        &self,
        sensor_id: &str,
        limit: i64,
    ) -> Result<Vec<Reading>, ClientError> {
        let q = query(
            "MATCH (r:Reading {sensor_id: $sensor_id})
            RETURN r
            ORDER BY r.timestamp DESC
            LIMIT $limit",
        )
        .param("sensor_id", sensor_id.to_string())
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("readings by sensor", e))?;
        let mut readings = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("readings by sensor", e))?
        {
            readings.push(node_to_reading(&node(&row, "r")?)?);
        }

        Ok(readings)
    }

    /// Update an existing reading, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no reading has this key.
    pub async fn update(&self, reading: &Reading) -> Result<Reading, ClientError> {
        let q = query(
            "MATCH (r:Reading {reading_id: $reading_id})
            SET r.sensor_id = $sensor_id,
                r.timestamp = $timestamp,
                r.value = $value
            RETURN r",
        )
        .param("reading_id", reading.reading_id.clone())
        .param("sensor_id", reading.sensor_id.clone())
        .param("timestamp", datetime_to_store(&reading.timestamp))
        .param("value", reading.value);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update reading", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update reading", e))?
        {
            Some(row) => node_to_reading(&node(&row, "r")?),
            None => Err(ClientError::not_found("Reading", &reading.reading_id)),
        }
    }

    /// Delete a reading.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, reading_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (r:Reading {reading_id: $reading_id})
            DETACH DELETE r
            RETURN count(r) AS deleted",
        )
        .param("reading_id", reading_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete reading", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete reading", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete reading", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted reading: {}", reading_id);
        }
        Ok(deleted)
    }
}
