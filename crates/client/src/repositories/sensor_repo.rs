//! Sensor repository.

use aerograph_domain::Sensor;
use neo4rs::query;

use super::helpers::{node, node_to_sensor};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Sensor nodes.
pub struct SensorRepo {
    session: Session,
}

impl SensorRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a sensor by its unique key and return the persisted record.
    ///
    /// The HAS_SENSOR edge from the parent system is merged in the same query
    /// and skipped when the system is not ingested yet.
    pub async fn create(&self, sensor: &Sensor) -> Result<Sensor, ClientError> {
        let q = query(
            "MERGE (sn:Sensor {sensor_id: $sensor_id})
            SET sn.system_id = $system_id,
                sn.name = $name,
                sn.type = $type,
                sn.unit = $unit
            WITH sn
            OPTIONAL MATCH (s:System {system_id: $system_id})
            FOREACH (x IN CASE WHEN s IS NULL THEN [] ELSE [1] END |
                MERGE (s)-[:HAS_SENSOR]->(sn))
            RETURN sn",
        )
        .param("sensor_id", sensor.sensor_id.clone())
        .param("system_id", sensor.system_id.clone())
        .param("name", sensor.name.clone())
        .param("type", sensor.r#type.clone())
        .param("unit", sensor.unit.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create sensor", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create sensor", e))?
        {
            Some(row) => node_to_sensor(&node(&row, "sn")?),
            None => Err(ClientError::query(
                "create sensor",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a sensor by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, sensor_id: &str) -> Result<Option<Sensor>, ClientError> {
        let q = query("MATCH (sn:Sensor {sensor_id: $sensor_id}) RETURN sn")
            .param("sensor_id", sensor_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find sensor", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find sensor", e))?
        {
            Ok(Some(node_to_sensor(&node(&row, "sn")?)?))
        } else {
            Ok(None)
        }
    }

    /// List sensors ordered by name, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Sensor>, ClientError> {
        let q = query(
            "MATCH (sn:Sensor)
            RETURN sn
            ORDER BY sn.name
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list sensors", e))?;
        let mut sensors = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list sensors", e))?
        {
            sensors.push(node_to_sensor(&node(&row, "sn")?)?);
        }

        Ok(sensors)
    }

    /// Sensors monitoring a system, via HAS_SENSOR, ordered by name.
    /// Unbounded; systems carry small sensor counts.
    pub async fn find_by_system(&self, system_id: &str) -> Result<Vec<Sensor>, ClientError> {
        let q = query(
            "MATCH (s:System {system_id: $system_id})-[:HAS_SENSOR]->(sn:Sensor)
            RETURN sn
            ORDER BY sn.name",
        )
        .param("system_id", system_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("sensors by system", e))?;
        let mut sensors = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("sensors by system", e))?
        {
            sensors.push(node_to_sensor(&node(&row, "sn")?)?);
        }

        Ok(sensors)
    }

    /// Update an existing sensor, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no sensor has this key.
    pub async fn update(&self, sensor: &Sensor) -> Result<Sensor, ClientError> {
        let q = query(
            "MATCH (sn:Sensor {sensor_id: $sensor_id})
            SET sn.system_id = $system_id,
                sn.name = $name,
                sn.type = $type,
                sn.unit = $unit
            RETURN sn",
        )
        .param("sensor_id", sensor.sensor_id.clone())
        .param("system_id", sensor.system_id.clone())
        .param("name", sensor.name.clone())
        .param("type", sensor.r#type.clone())
        .param("unit", sensor.unit.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update sensor", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update sensor", e))?
        {
            Some(row) => node_to_sensor(&node(&row, "sn")?),
            None => Err(ClientError::not_found("Sensor", &sensor.sensor_id)),
        }
    }

    /// Delete a sensor and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, sensor_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (sn:Sensor {sensor_id: $sensor_id})
            DETACH DELETE sn
            RETURN count(sn) AS deleted",
        )
        .param("sensor_id", sensor_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete sensor", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete sensor", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete sensor", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted sensor: {}", sensor_id);
        }
        Ok(deleted)
    }
}
