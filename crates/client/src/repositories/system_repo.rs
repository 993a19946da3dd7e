//! System repository.

use aerograph_domain::System;
use neo4rs::query;

use super::helpers::{node, node_to_system};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for System nodes.
pub struct SystemRepo {
    session: Session,
}

impl SystemRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a system by its unique key and return the persisted record.
    ///
    /// The HAS_SYSTEM edge from the parent aircraft is merged in the same
    /// query and skipped when the aircraft is not ingested yet.
    pub async fn create(&self, system: &System) -> Result<System, ClientError> {
        let q = query(
            "MERGE (s:System {system_id: $system_id})
            SET s.aircraft_id = $aircraft_id,
                s.name = $name,
                s.type = $type
            WITH s
            OPTIONAL MATCH (a:Aircraft {aircraft_id: $aircraft_id})
            FOREACH (x IN CASE WHEN a IS NULL THEN [] ELSE [1] END |
                MERGE (a)-[:HAS_SYSTEM]->(s))
            RETURN s",
        )
        .param("system_id", system.system_id.clone())
        .param("aircraft_id", system.aircraft_id.clone())
        .param("name", system.name.clone())
        .param("type", system.r#type.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create system", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create system", e))?
        {
            Some(row) => node_to_system(&node(&row, "s")?),
            None => Err(ClientError::query(
                "create system",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a system by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, system_id: &str) -> Result<Option<System>, ClientError> {
        let q = query("MATCH (s:System {system_id: $system_id}) RETURN s")
            .param("system_id", system_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find system", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find system", e))?
        {
            Ok(Some(node_to_system(&node(&row, "s")?)?))
        } else {
            Ok(None)
        }
    }

    /// List systems ordered by name, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<System>, ClientError> {
        let q = query(
            "MATCH (s:System)
            RETURN s
            ORDER BY s.name
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list systems", e))?;
        let mut systems = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list systems", e))?
        {
            systems.push(node_to_system(&node(&row, "s")?)?);
        }

        Ok(systems)
    }

    /// Systems installed on an aircraft, via HAS_SYSTEM, ordered by name.
    /// Unbounded; fleets carry a handful of systems per airframe.
    pub async fn find_by_aircraft(&self, aircraft_id: &str) -> Result<Vec<System>, ClientError> {
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
            .map_err(|e| ClientError::query("systems by aircraft", e))?;
        let mut systems = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("systems by aircraft", e))?
        {
            systems.push(node_to_system(&node(&row, "s")?)?);
        }

        Ok(systems)
    }

    /// Update an existing system, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no system has this key.
    pub async fn update(&self, system: &System) -> Result<System, ClientError> {
        let q = query(
            "MATCH (s:System {system_id: $system_id})
            SET s.aircraft_id = $aircraft_id,
                s.name = $name,
                s.type = $type
            RETURN s",
        )
        .param("system_id", system.system_id.clone())
        .param("aircraft_id", system.aircraft_id.clone())
        .param("name", system.name.clone())
        .param("type", system.r#type.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update system", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update system", e))?
        {
            Some(row) => node_to_system(&node(&row, "s")?),
            None => Err(ClientError::not_found("System", &system.system_id)),
        }
    }

    /// Delete a system and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, system_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (s:System {system_id: $system_id})
            DETACH DELETE s
            RETURN count(s) AS deleted",
        )
        .param("system_id", system_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete system", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete system", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete system", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted system: {}", system_id);
        }
        Ok(deleted)
    }
}
