//! Aerograph client library.
//!
//! Data-access layer for the aviation property graph in Neo4j. Every query is
//! parameterized; user-supplied values travel as named bound parameters and are
//! never interpolated into Cypher text.
//!
//! ## Structure
//!
//! - `config` - Endpoint settings (constructor or `NEO4J_*` environment)
//! - `connection` - Pooled connection lifecycle and scoped sessions
//! - `repositories` - One repository per entity type
//! - `schema` - Idempotent uniqueness constraints and lookup indexes
//! - `error` - The `ClientError` taxonomy shared by all of the above

pub mod config;
pub mod connection;
pub mod error;
pub mod repositories;
pub mod schema;

/// Testcontainer-based Neo4j harness for integration tests.
#[cfg(test)]
mod test_harness;

pub use config::StoreSettings;
pub use connection::{Neo4jConnection, Session};
pub use error::ClientError;
pub use repositories::{
    AircraftRepo, AirportRepo, ComponentRepo, DelayRepo, FlightRepo, MaintenanceEventRepo,
    ReadingRepo, Repositories, SensorRepo, SystemRepo, DEFAULT_LIMIT,
};
