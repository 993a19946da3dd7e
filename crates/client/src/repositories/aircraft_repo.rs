//! Aircraft repository.

use aerograph_domain::{Aircraft, Component, System};
use neo4rs::query;

use super::helpers::{node, node_to_aircraft, node_to_component, node_to_system};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Aircraft nodes.
pub struct AircraftRepo {
    session: Session,
}

impl AircraftRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert an aircraft by its unique key and return the persisted record.
    pub async fn create(&self, aircraft: &Aircraft) -> Result<Aircraft, ClientError> {
        let q = query(
            "MERGE (a:Aircraft {aircraft_id: $aircraft_id})
            SET a.tail_number = $tail_number,
                a.icao24 = $icao24,
                a.model = $model,
                a.operator = $operator,
                a.manufacturer = $manufacturer
            RETURN a",
        )
        .param("aircraft_id", aircraft.aircraft_id.clone())
        .param("tail_number", aircraft.tail_number.clone())
        .param("icao24", aircraft.icao24.clone())
        .param("model", aircraft.model.clone())
        .param("operator", aircraft.operator.clone())
        .param("manufacturer", aircraft.manufacturer.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create aircraft", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create aircraft", e))?
        {
            Some(row) => node_to_aircraft(&node(&row, "a")?),
            None => Err(ClientError::query(
                "create aircraft",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get an aircraft by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, aircraft_id: &str) -> Result<Option<Aircraft>, ClientError> {
        let q = query("MATCH (a:Aircraft {aircraft_id: $aircraft_id}) RETURN a")
            .param("aircraft_id", aircraft_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find aircraft", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find aircraft", e))?
        {
            Ok(Some(node_to_aircraft(&node(&row, "a")?)?))
        } else {
            Ok(None)
        }
    }

    /// Get an aircraft by registration/tail number.
    pub async fn find_by_tail_number(
        &self,
        tail_number: &str,
    ) -> Result<Option<Aircraft>, ClientError> {
        let q = query("MATCH (a:Aircraft {tail_number: $tail_number}) RETURN a")
            .param("tail_number", tail_number.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find aircraft", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find aircraft", e))?
        {
            Ok(Some(node_to_aircraft(&node(&row, "a")?)?))
        } else {
            Ok(None)
        }
    }

    /// List aircraft ordered by tail number, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Aircraft>, ClientError> {
        let q = query(
            "MATCH (a:Aircraft)
            RETURN a
            ORDER BY a.tail_number
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list aircraft", e))?;
        let mut aircraft = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list aircraft", e))?
        {
            aircraft.push(node_to_aircraft(&node(&row, "a")?)?);
        }

        Ok(aircraft)
    }

    /// Update an existing aircraft, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no aircraft has this key.
    pub async fn update(&self, aircraft: &Aircraft) -> Result<Aircraft, ClientError> {
        let q = query(
            "MATCH (a:Aircraft {aircraft_id: $aircraft_id})
            SET a.tail_number = $tail_number,
                a.icao24 = $icao24,
                a.model = $model,
                a.operator = $operator,
                a.manufacturer = $manufacturer
            RETURN a",
        )
        .param("aircraft_id", aircraft.aircraft_id.clone())
        .param("tail_number", aircraft.tail_number.clone())
        .param("icao24", aircraft.icao24.clone())
        .param("model", aircraft.model.clone())
        .param("operator", aircraft.operator.clone())
        .param("manufacturer", aircraft.manufacturer.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update aircraft", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update aircraft", e))?
        {
            Some(row) => node_to_aircraft(&node(&row, "a")?),
            None => Err(ClientError::not_found("Aircraft", &aircraft.aircraft_id)),
        }
    }

    /// Delete an aircraft and all its relationships.
    ///
    /// Returns whether a node existed to delete; a missing key is not an
    /// error.
    pub async fn delete(&self, aircraft_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (a:Aircraft {aircraft_id: $aircraft_id})
            DETACH DELETE a
            RETURN count(a) AS deleted",
        )
        .param("aircraft_id", aircraft_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete aircraft", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete aircraft", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete aircraft", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted aircraft: {}", aircraft_id);
        }
        Ok(deleted)
    }

    /// Get all systems installed on an aircraft, ordered by name.
    pub async fn get_systems(&self, aircraft_id: &str) -> Result<Vec<System>, ClientError> {
        let q = query(
            "MATCH (a:Aircraft {aircraft_id: $aircraft_id})-[:HAS_SYSTEM]->(s:System)
            RETURN s
            ORDER BY s.name",
        )
        .param("aircraft_id", aircraft_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("aircraft systems", e))?;
        let mut systems = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("aircraft systems", e))?
        {
            systems.push(node_to_system(&node(&row, "s")?)?);
        }

        Ok(systems)
    }

    /// Get all components on an aircraft, across all of its systems.
    pub async fn get_components(&self, aircraft_id: &str) -> Result<Vec<Component>, ClientError> {
        let q = query(
            "MATCH (a:Aircraft {aircraft_id: $aircraft_id})-[:HAS_SYSTEM]->(:System)-[:HAS_COMPONENT]->(c:Component)
            RETURN c
            ORDER BY c.name",
        )
        .param("aircraft_id", aircraft_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("aircraft components", e))?;
        let mut components = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("aircraft components", e))?
        {
            components.push(node_to_component(&node(&row, "c")?)?);
        }

        Ok(components)
    }
}
