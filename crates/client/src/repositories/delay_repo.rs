//! Delay repository.

use aerograph_domain::Delay;
use neo4rs::query;

use super::helpers::{node, node_to_delay};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Delay nodes.
pub struct DelayRepo {
    session: Session,
}

impl DelayRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a delay by its unique key and return the persisted record.
    ///
    /// The HAS_DELAY edge from the affected flight is merged in the same
    /// query and skipped when the flight is not ingested yet.
    pub async fn create(&self, delay: &Delay) -> Result<Delay, ClientError> {
        let q = query(
            "MERGE (d:Delay {delay_id: $delay_id})
            SET d.flight_id = $flight_id,
                d.cause = $cause,
                d.minutes = $minutes
            WITH d
            OPTIONAL MATCH (f:Flight {flight_id: $flight_id})
            FOREACH (x IN CASE WHEN f IS NULL THEN [] ELSE [1] END |
                MERGE (f)-[:HAS_DELAY]->(d))
            RETURN d",
        )
        .param("delay_id", delay.delay_id.clone())
        .param("flight_id", delay.flight_id.clone())
        .param("cause", delay.cause.clone())
        .param("minutes", i64::from(delay.minutes));

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create delay", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create delay", e))?
        {
            Some(row) => node_to_delay(&node(&row, "d")?),
            None => Err(ClientError::query(
                "create delay",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a delay by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, delay_id: &str) -> Result<Option<Delay>, ClientError> {
        let q = query("MATCH (d:Delay {delay_id: $delay_id}) RETURN d")
            .param("delay_id", delay_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find delay", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find delay", e))?
        {
            Ok(Some(node_to_delay(&node(&row, "d")?)?))
        } else {
            Ok(None)
        }
    }

    /// List delays, longest first, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Delay>, ClientError> {
        let q = query(
            "MATCH (d:Delay)
            RETURN d
            ORDER BY d.minutes DESC
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("list delays", e))?;
        let mut delays = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("list delays", e))?
        {
            delays.push(node_to_delay(&node(&row, "d")?)?);
        }

        Ok(delays)
    }

    /// Delays recorded against one flight, via HAS_DELAY, longest first.
    /// Unbounded; a flight accrues few delay incidents.
    pub async fn find_by_flight(&self, flight_id: &str) -> Result<Vec<Delay>, ClientError> {
        let q = query(
            "MATCH (f:Flight {flight_id: $flight_id})-[:HAS_DELAY]->(d:Delay)
            RETURN d
            ORDER BY d.minutes DESC",
        )
        .param("flight_id", flight_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delays by flight", e))?;
        let mut delays = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("delays by flight", e))?
        {
            delays.push(node_to_delay(&node(&row, "d")?)?);
        }

        Ok(delays)
    }

    /// Delays of at least `min_minutes`, longest first, bounded by `limit`.
    pub async fn find_significant_delays(
        &self,
        min_minutes: u32,
        limit: i64,
    ) -> Result<Vec<Delay>, ClientError> {
        let q = query(
            "MATCH (d:Delay)
            WHERE d.minutes >= $min_minutes
            RETURN d
            ORDER BY d.minutes DESC
            LIMIT $limit",
        )
        .param("min_minutes", i64::from(min_minutes))
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("significant delays", e))?;
        let mut delays = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("significant delays", e))?
        {
            delays.push(node_to_delay(&node(&row, "d")?)?);
        }

        Ok(delays)
    }

    /// Update an existing delay, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no delay has this key.
    pub async fn update(&self, delay: &Delay) -> Result<Delay, ClientError> {
        let q = query(
            "MATCH (d:Delay {delay_id: $delay_id})
            SET d.flight_id = $flight_id,
                d.cause = $cause,
                d.minutes = $minutes
            RETURN d",
        )
        .param("delay_id", delay.delay_id.clone())
        .param("flight_id", delay.flight_id.clone())
        .param("cause", delay.cause.clone())
        .param("minutes", i64::from(delay.minutes));

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update delay", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update delay", e))?
        {
            Some(row) => node_to_delay(&node(&row, "d")?),
            None => Err(ClientError::not_found("Delay", &delay.delay_id)),
        }
    }

    /// Delete a delay and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, delay_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (d:Delay {delay_id: $delay_id})
            DETACH DELETE d
            RETURN count(d) AS deleted",
        )
        .param("delay_id", delay_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete delay", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete delay", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete delay", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted delay: {}", delay_id);
        }
        Ok(deleted)
    }
}
