//! MaintenanceEvent repository.
//!
//! Events attach to three levels of the hierarchy at once, so their upsert
//! merges AFFECTS_AIRCRAFT, AFFECTS_SYSTEM, and HAS_EVENT in one query. Each
//! edge is skipped when its target node is not ingested yet.

use aerograph_domain::{ComponentFault, MaintenanceEvent, Severity};
use neo4rs::query;

use super::helpers::{datetime_to_store, node, node_to_component, node_to_event};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for MaintenanceEvent nodes.
pub struct MaintenanceEventRepo {
    session: Session,
}

impl MaintenanceEventRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a maintenance event by its unique key and return the persisted
    /// record.
    pub async fn create(&self, event: &MaintenanceEvent) -> Result<MaintenanceEvent, ClientError> {
        let q = query(
            "MERGE (m:MaintenanceEvent {event_id: $event_id})
            SET m.aircraft_id = $aircraft_id,
                m.system_id = $system_id,
                m.component_id = $component_id,
                m.fault = $fault,
                m.severity = $severity,
                m.reported_at = $reported_at,
                m.corrective_action = $corrective_action
            WITH m
            OPTIONAL MATCH (a:Aircraft {aircraft_id: $aircraft_id})
            FOREACH (x IN CASE WHEN a IS NULL THEN [] ELSE [1] END |
                MERGE (m)-[:AFFECTS_AIRCRAFT]->(a))
            WITH m
            OPTIONAL MATCH (s:System {system_id: $system_id})
            FOREACH (x IN CASE WHEN s IS NULL THEN [] ELSE [1] END |
                MERGE (m)-[:AFFECTS_SYSTEM]->(s))
            WITH m
            OPTIONAL MATCH (c:Component {component_id: $component_id})
            FOREACH (x IN CASE WHEN c IS NULL THEN [] ELSE [1] END |
                MERGE (c)-[:HAS_EVENT]->(m))
            RETURN m",
        )
        .param("event_id", event.event_id.clone())
        .param("aircraft_id", event.aircraft_id.clone())
        .param("system_id", event.system_id.clone())
        .param("component_id", event.component_id.clone())
        .param("fault", event.fault.clone())
        .param("severity", event.severity.as_str().to_string())
        .param("reported_at", datetime_to_store(&event.reported_at))
        .param("corrective_action", event.corrective_action.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create event", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create event", e))?
        {
            Some(row) => node_to_event(&node(&row, "m")?),
            None => Err(ClientError::query(
                "create event",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a maintenance event by ID. Absent is `None`, never an error.
    pub async fn find_by_id(
        &self,
        event_id: &str,
    ) -> Result<Option<MaintenanceEvent>, ClientError> {
        let q = query("MATCH (m:MaintenanceEvent {event_id: $event_id}) RETURN m")
            .param("event_id", event_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find event", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find event", e))?
        {
            Ok(Some(node_to_event(&node(&row, "m")?)?))
        } else {
            Ok(None)
        }
    }

    /// List maintenance events, most recently reported first, bounded by
    /// `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<MaintenanceEvent>, ClientError> {
        let q = query(
            "MATCH (m:MaintenanceEvent)
            RETURN m
            ORDER BY m.reported_at DESC
            LIMIT $limit",
        )
        .param("limit", limit);

        self.collect_events(q, "list events").await
    }

    /// Maintenance events for an aircraft, via AFFECTS_AIRCRAFT, most
    /// recently reported first.
    pub async fn find_by_aircraft(
        &self,
        aircraft_id: &str,
        limit: i64,
    ) -> Result<Vec<MaintenanceEvent>, ClientError> {
        let q = query(
            "MATCH (m:MaintenanceEvent)-[:AFFECTS_AIRCRAFT]->(a:Aircraft {aircraft_id: $aircraft_id})
            RETURN m
            ORDER BY m.reported_at DESC
            LIMIT $limit",
        )
        .param("aircraft_id", aircraft_id.to_string())
        .param("limit", limit);

        self.collect_events(q, "events by aircraft").await
    }

    /// Maintenance events at one severity, most recently reported first.
    /// The filter is an exact match on the severity's wire string.
    pub async fn find_by_severity(
        &self,
        severity: Severity,
        limit: i64,
    ) -> Result<Vec<MaintenanceEvent>, ClientError> {
        let q = query(
            "MATCH (m:MaintenanceEvent {severity: $severity})
            RETURN m
            ORDER BY m.reported_at DESC
            LIMIT $limit",
        )
        .param("severity", severity.as_str().to_string())
        .param("limit", limit);

        self.collect_events(q, "events by severity").await
    }

    /// Components with critical maintenance events (missing/faulty parts),
    /// paired with the event, most recently reported first.
    pub async fn find_missing_components(
        &self,
        limit: i64,
    ) -> Result<Vec<ComponentFault>, ClientError> {
        let q = query(
            "MATCH (c:Component)-[:HAS_EVENT]->(m:MaintenanceEvent)
            WHERE m.severity = $severity
            RETURN c, m
            ORDER BY m.reported_at DESC
            LIMIT $limit",
        )
        .param("severity", Severity::Critical.as_str().to_string())
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("missing components", e))?;
        let mut faults = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("missing components", e))?
        {
            let component = node_to_component(&node(&row, "c")?)?;
            let event = node_to_event(&node(&row, "m")?)?;
            faults.push(ComponentFault { component, event });
        }

        Ok(faults)
    }

    /// Update an existing maintenance event, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no event has this key.
    pub async fn update(&self, event: &MaintenanceEvent) -> Result<MaintenanceEvent, ClientError> {
        let q = query(
            "MATCH (m:MaintenanceEvent {event_id: $event_id})
            SET m.aircraft_id = $aircraft_id,
                m.system_id = $system_id,
                m.component_id = $component_id,
                m.fault = $fault,
                m.severity = $severity,
                m.reported_at = $reported_at,
                m.corrective_action = $corrective_action
            RETURN m",
        )
        .param("event_id", event.event_id.clone())
        .param("aircraft_id", event.aircraft_id.clone())
        .param("system_id", event.system_id.clone())
        .param("component_id", event.component_id.clone())
        .param("fault", event.fault.clone())
        .param("severity", event.severity.as_str().to_string())
        .param("reported_at", datetime_to_store(&event.reported_at))
        .param("corrective_action", event.corrective_action.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update event", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update event", e))?
        {
            Some(row) => node_to_event(&node(&row, "m")?),
            None => Err(ClientError::not_found("MaintenanceEvent", &event.event_id)),
        }
    }

    /// Delete a maintenance event and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, event_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (m:MaintenanceEvent {event_id: $event_id})
            DETACH DELETE m
            RETURN count(m) AS deleted",
        )
        .param("event_id", event_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete event", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete event", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete event", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted maintenance event: {}", event_id);
        }
        Ok(deleted)
    }

    async fn collect_events(
        &self,
        q: neo4rs::Query,
        operation: &'static str,
    ) -> Result<Vec<MaintenanceEvent>, ClientError> {
        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query(operation, e))?;
        let mut events = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query(operation, e))?
        {
            events.push(node_to_event(&node(&row, "m")?)?);
        }

        Ok(events)
    }
}
