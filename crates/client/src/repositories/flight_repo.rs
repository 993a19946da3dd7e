//! Flight repository.
//!
//! Flights are the hub of the operational subgraph: their upsert writes the
//! OPERATES_FLIGHT and ARRIVES_AT edges alongside the denormalized reference
//! properties, in a single query, so a create is atomic even when it also
//! wires relationships.

use aerograph_domain::{Airport, DelayedFlight, Flight, FlightArrival};
use neo4rs::query;

use super::helpers::{
    datetime_to_store, node, node_to_airport, node_to_delay, node_to_flight,
};
use crate::connection::Session;
use crate::error::ClientError;

/// Repository for Flight nodes.
pub struct FlightRepo {
    session: Session,
}

impl FlightRepo {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Upsert a flight by its unique key and return the persisted record.
    ///
    /// The OPERATES_FLIGHT and ARRIVES_AT edges are merged in the same query;
    /// either edge is skipped when its target node has not been ingested yet,
    /// leaving the property references as the only link until it is.
    pub async fn create(&self, flight: &Flight) -> Result<Flight, ClientError> {
        let q = query(
            "MERGE (f:Flight {flight_id: $flight_id})
            SET f.flight_number = $flight_number,
                f.aircraft_id = $aircraft_id,
                f.operator = $operator,
                f.origin = $origin,
                f.destination = $destination,
                f.scheduled_departure = $scheduled_departure,
                f.scheduled_arrival = $scheduled_arrival
            WITH f
            OPTIONAL MATCH (a:Aircraft {aircraft_id: $aircraft_id})
            FOREACH (x IN CASE WHEN a IS NULL THEN [] ELSE [1] END |
                MERGE (a)-[:OPERATES_FLIGHT]->(f))
            WITH f
            OPTIONAL MATCH (ap:Airport {iata: $destination})
            FOREACH (x IN CASE WHEN ap IS NULL THEN [] ELSE [1] END |
                MERGE (f)-[:ARRIVES_AT]->(ap))
            RETURN f",
        )
        .param("flight_id", flight.flight_id.clone())
        .param("flight_number", flight.flight_number.clone())
        .param("aircraft_id", flight.aircraft_id.clone())
        .param("operator", flight.operator.clone())
        .param("origin", flight.origin.clone())
        .param("destination", flight.destination.clone())
        .param(
            "scheduled_departure",
            datetime_to_store(&flight.scheduled_departure),
        )
        .param(
            "scheduled_arrival",
            datetime_to_store(&flight.scheduled_arrival),
        );

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("create flight", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("create flight", e))?
        {
            Some(row) => node_to_flight(&node(&row, "f")?),
            None => Err(ClientError::query(
                "create flight",
                "no row returned from MERGE",
            )),
        }
    }

    /// Get a flight by ID. Absent is `None`, never an error.
    pub async fn find_by_id(&self, flight_id: &str) -> Result<Option<Flight>, ClientError> {
        let q = query("MATCH (f:Flight {flight_id: $flight_id}) RETURN f")
            .param("flight_id", flight_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("find flight", e))?;

        if let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("find flight", e))?
        {
            Ok(Some(node_to_flight(&node(&row, "f")?)?))
        } else {
            Ok(None)
        }
    }

    /// List flights, most recent scheduled departure first, bounded by `limit`.
    pub async fn find_all(&self, limit: i64) -> Result<Vec<Flight>, ClientError> {
        let q = query(
            "MATCH (f:Flight)
            RETURN f
            ORDER BY f.scheduled_departure DESC
            LIMIT $limit",
        )
        .param("limit", limit);

        self.collect_flights(q, "list flights").await
    }

    /// Flights operated by an aircraft, via the OPERATES_FLIGHT edge, most
    /// recent scheduled departure first.
    ///
    /// Prefer this form; it only sees flights whose aircraft node is ingested
    /// and linked. For partially-ingested data use
    /// [`find_by_aircraft_id`](Self::find_by_aircraft_id).
    pub async fn find_by_aircraft(
        &self,
        aircraft_id: &str,
        limit: i64,
    ) -> Result<Vec<Flight>, ClientError> {
        let q = query(
            "MATCH (a:Aircraft {aircraft_id: $aircraft_id})-[:OPERATES_FLIGHT]->(f:Flight)
            RETURN f
            ORDER BY f.scheduled_departure DESC
            LIMIT $limit",
        )
        .param("aircraft_id", aircraft_id.to_string())
        .param("limit", limit);

        self.collect_flights(q, "flights by aircraft").await
    }

    /// Flights operated by an aircraft, matched on the denormalized
    /// `aircraft_id` property instead of the edge.
    ///
    /// Degenerate fallback for data ingested before its aircraft node; when
    /// the edges exist both forms return the same set.
    pub async fn find_by_aircraft_id(
        &self,
        aircraft_id: &str,
        limit: i64,
    ) -> Result<Vec<Flight>, ClientError> {
        let q = query(
            "MATCH (f:Flight {aircraft_id: $aircraft_id})
            RETURN f
            ORDER BY f.scheduled_departure DESC
            LIMIT $limit",
        )
        .param("aircraft_id", aircraft_id.to_string())
        .param("limit", limit);

        self.collect_flights(q, "flights by aircraft").await
    }

    /// Latest arrivals paired with their destination airport, most recent
    /// scheduled arrival first. A limit of 20 is the usual report size.
    pub async fn find_latest_destinations(
        &self,
        limit: i64,
    ) -> Result<Vec<FlightArrival>, ClientError> {
        let q = query(
            "MATCH (f:Flight)-[:ARRIVES_AT]->(a:Airport)
            RETURN f, a
            ORDER BY f.scheduled_arrival DESC
            LIMIT $limit",
        )
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("latest destinations", e))?;
        let mut arrivals = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("latest destinations", e))?
        {
            let flight = node_to_flight(&node(&row, "f")?)?;
            let destination: Airport = node_to_airport(&node(&row, "a")?)?;
            arrivals.push(FlightArrival {
                flight,
                destination,
            });
        }

        Ok(arrivals)
    }

    /// Flights paired with their delays of at least `min_minutes`, longest
    /// delay first.
    pub async fn find_with_delays(
        &self,
        min_minutes: u32,
        limit: i64,
    ) -> Result<Vec<DelayedFlight>, ClientError> {
        let q = query(
            "MATCH (f:Flight)-[:HAS_DELAY]->(d:Delay)
            WHERE d.minutes >= $min_minutes
            RETURN f, d
            ORDER BY d.minutes DESC
            LIMIT $limit",
        )
        .param("min_minutes", i64::from(min_minutes))
        .param("limit", limit);

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delayed flights", e))?;
        let mut delayed = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query("delayed flights", e))?
        {
            let flight = node_to_flight(&node(&row, "f")?)?;
            let delay = node_to_delay(&node(&row, "d")?)?;
            delayed.push(DelayedFlight { flight, delay });
        }

        Ok(delayed)
    }

    /// Update an existing flight, strictly by key (no upsert).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no flight has this key.
    pub async fn update(&self, flight: &Flight) -> Result<Flight, ClientError> {
        let q = query(
            "MATCH (f:Flight {flight_id: $flight_id})
            SET f.flight_number = $flight_number,
                f.aircraft_id = $aircraft_id,
                f.operator = $operator,
                f.origin = $origin,
                f.destination = $destination,
                f.scheduled_departure = $scheduled_departure,
                f.scheduled_arrival = $scheduled_arrival
            RETURN f",
        )
        .param("flight_id", flight.flight_id.clone())
        .param("flight_number", flight.flight_number.clone())
        .param("aircraft_id", flight.aircraft_id.clone())
        .param("operator", flight.operator.clone())
        .param("origin", flight.origin.clone())
        .param("destination", flight.destination.clone())
        .param(
            "scheduled_departure",
            datetime_to_store(&flight.scheduled_departure),
        )
        .param(
            "scheduled_arrival",
            datetime_to_store(&flight.scheduled_arrival),
        );

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("update flight", e))?;

        match result
            .next()
            .await
            .map_err(|e| ClientError::query("update flight", e))?
        {
            Some(row) => node_to_flight(&node(&row, "f")?),
            None => Err(ClientError::not_found("Flight", &flight.flight_id)),
        }
    }

    /// Delete a flight and all its relationships.
    ///
    /// Returns whether a node existed to delete.
    pub async fn delete(&self, flight_id: &str) -> Result<bool, ClientError> {
        let q = query(
            "MATCH (f:Flight {flight_id: $flight_id})
            DETACH DELETE f
            RETURN count(f) AS deleted",
        )
        .param("flight_id", flight_id.to_string());

        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query("delete flight", e))?;

        let deleted = match result
            .next()
            .await
            .map_err(|e| ClientError::query("delete flight", e))?
        {
            Some(row) => {
                row.get::<i64>("deleted")
                    .map_err(|e| ClientError::query("delete flight", e))?
                    > 0
            }
            None => false,
        };

        if deleted {
            tracing::debug!("Deleted flight: {}", flight_id);
        }
        Ok(deleted)
    }

    async fn collect_flights(
        &self,
        q: neo4rs::Query,
        operation: &'static str,
    ) -> Result<Vec<Flight>, ClientError> {
        let mut result = self
            .session
            .execute(q)
            .await
            .map_err(|e| ClientError::query(operation, e))?;
        let mut flights = Vec::new();

        while let Some(row) = result
            .next()
            .await
            .map_err(|e| ClientError::query(operation, e))?
        {
            flights.push(node_to_flight(&node(&row, "f")?)?);
        }

        Ok(flights)
    }
}
