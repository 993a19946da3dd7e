//! Component repository.

use aerograph_domain::Component;
use neo4rs::query;

use super::helpers::{node, node_to_component};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Component nodes.
pub struct ComponentRepo {
    session: Session,
}

impl ComponentRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a component by its unique key and return the persisted record.
    ///
    /// The HAS_COMPONENT edge from the parent system is merged in the same
    /// query and skipped when the system is not ingested yet.
    pub async fn create(&self, component: &Component) -> Result<Component, ClientError> {
        let q = query(
            "MERGE (c:Component {component_id: $component_id})
            SET c.system_id = $system_id,
                c.name = $name,
                c.type = $type
            WITH c
            OPTIONAL MATCH (s:System {system_id: $system_id})
            FOREACH (x IN CASE WHEN s IS NULL THEN [] ELSE [1] END |
                MERGE (s)-[:HAS_COMPONENT]->(c))
            RETURN c",
        )
        .param("component_id", component.component_id.clone())
        .param("system_id", component.system_id.clone())
        .param("name", component.name.clone())
        .param("type", component.r#type.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create component", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create component", e))?
        {
            Some(row) => node_to_component(&node(&row, "c")?),
            None => Err(ClientError::query(
                "create component",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a component by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, component_id: &str) -> Result<Option<Component>, ClientError> {
        let q = query("MATCH (c:Component {component_id: $component_id}) RETURN c")
            .param("component_id", component_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find component", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find component", e))?
        {
            Ok(Some(node_to_component(&node(&row, "c")?)?))
        } else {
            Ok(None)
        }
    }

    /// List components ordered by name, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Component>, ClientError> {
        let q = query(
            "MATCH (c:Component)
            RETURN c
            ORDER BY c.name
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list components", e))?;
        let mut components = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list components", e))?
        {
            components.push(node_to_component(&node(&row, "c")?)?);
        }

        Ok(components)
    }

    /// Components of a system, via HAS_COMPONENT, ordered by name. Unbounded;
    /// systems carry small component counts.
    pub async fn find_by_system(&self, system_id: &str) -> Result<Vec<Component>, ClientError> {
        let q = query(
            "MATCH (s:System {system_id: $system_id})-[:HAS_COMPONENT]->(c:Component)
            RETURN c
            ORDER BY c.name",
        )
        .param("system_id", system_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("components by system", e))?;
        let mut components = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("components by system", e))?
        {
            components.push(node_to_component(&node(&row, "c")?)?);
        }

        Ok(components)
    }

    /// Update an existing component, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no component has this key.
    pub async fn update(&self, component: &Component) -> Result<Component, ClientError> {
        let q = query(
            "MATCH (c:Component {component_id: $component_id})
            SET c.system_id = $system_id,
                c.name = $name,
                c.type = $type
            RETURN c",
        )
        .param("component_id", component.component_id.clone())
        .param("system_id", component.system_id.clone())
        .param("name", component.name.clone())
        .param("type", component.r#type.clone());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update component", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update component", e))?
        {
            Some(row) => node_to_component(&node(&row, "c")?),
            None => Err(ClientError::not_found(
                "Component",
                &component.component_id,
            )),
        }
    }

    /// Delete a component and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, component_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (c:Component {component_id: $component_id})
            DETACH DELETE c
            RETURN count(c) AS deleted",
        )
        .param("component_id", component_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete component", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete component", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete component", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted component: {}", component_id);
        }
        Ok(deleted)
    }
}
