//! Schema initialization - constraints and indexes.

use neo4rs::query;

use crate::connection::Session;
use crate::error::ClientError;

/// Initialize the schema with uniqueness constraints and lookup indexes.
///
/// Call once on startup. Everything is created with IF NOT EXISTS so the call
/// is idempotent. Failures on individual statements are logged and skipped so
/// that older server versions without a given syntax still come up.
pub async fn ensure_schema(session: &Session) -> Result<(), ClientError> {
    // One uniqueness constraint per label key; these back the upsert
    // semantics of every repository's create().
    let constraints = [
        "CREATE CONSTRAINT aircraft_id IF NOT EXISTS FOR (a:Aircraft) REQUIRE a.aircraft_id IS UNIQUE",
        "CREATE CONSTRAINT airport_id IF NOT EXISTS FOR (a:Airport) REQUIRE a.airport_id IS UNIQUE",
        "CREATE CONSTRAINT flight_id IF NOT EXISTS FOR (f:Flight) REQUIRE f.flight_id IS UNIQUE",
        "CREATE CONSTRAINT system_id IF NOT EXISTS FOR (s:System) REQUIRE s.system_id IS UNIQUE",
        "CREATE CONSTRAINT component_id IF NOT EXISTS FOR (c:Component) REQUIRE c.component_id IS UNIQUE",
        "CREATE CONSTRAINT sensor_id IF NOT EXISTS FOR (s:Sensor) REQUIRE s.sensor_id IS UNIQUE",
        "CREATE CONSTRAINT reading_id IF NOT EXISTS FOR (r:Reading) REQUIRE r.reading_id IS UNIQUE",
        "CREATE CONSTRAINT event_id IF NOT EXISTS FOR (m:MaintenanceEvent) REQUIRE m.event_id IS UNIQUE",
        "CREATE CONSTRAINT delay_id IF NOT EXISTS FOR (d:Delay) REQUIRE d.delay_id IS UNIQUE",
    ];

    for constraint in constraints {
        if let Err(e) = session.run(query(constraint)).await {
            tracing::warn!("Constraint creation warning: {}", e);
        }
    }

    // Indexes for secondary finders and the denormalized reference fields
    // used by property-match fallback queries.
    let indexes = [
        "CREATE INDEX aircraft_tail_number IF NOT EXISTS FOR (a:Aircraft) ON (a.tail_number)",
        "CREATE INDEX airport_iata IF NOT EXISTS FOR (a:Airport) ON (a.iata)",
        "CREATE INDEX airport_icao IF NOT EXISTS FOR (a:Airport) ON (a.icao)",
        "CREATE INDEX flight_aircraft IF NOT EXISTS FOR (f:Flight) ON (f.aircraft_id)",
        "CREATE INDEX event_severity IF NOT EXISTS FOR (m:MaintenanceEvent) ON (m.severity)",
        "CREATE INDEX reading_sensor IF NOT EXISTS FOR (r:Reading) ON (r.sensor_id)",
        "CREATE INDEX delay_minutes IF NOT EXISTS FOR (d:Delay) ON (d.minutes)",
    ];

    for index in indexes {
        if let Err(e) = session.run(query(index)).await {
            tracing::warn!("Index creation warning: {}", e);
        }
    }

    tracing::info!("Graph schema initialized (constraints and indexes ensured)");
    Ok(())
}
