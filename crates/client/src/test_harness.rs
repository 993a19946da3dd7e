//! Neo4j test harness for integration testing.
//!
//! Provides testcontainer-based Neo4j instance management for the ignored
//! docker-backed tests.

use std::time::Duration;

use neo4rs::query;
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

use crate::config::StoreSettings;
use crate::connection::{Neo4jConnection, Session};
use crate::error::ClientError;

/// Password used for Neo4j test containers.
pub const TEST_NEO4J_PASSWORD: &str = "testpassword";

/// Neo4j test harness managing container lifecycle.
pub struct Neo4jTestHarness {
    _container: ContainerAsync<GenericImage>,
    connection: Neo4jConnection,
}

impl Neo4jTestHarness {
    /// Start a new Neo4j container and establish a verified connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or a connection
    /// cannot be established within the retry budget.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container: ContainerAsync<GenericImage> =
            neo4j_image(TEST_NEO4J_PASSWORD).start().await;
        let bolt_port = container.get_host_port_ipv4(7687).await;
        let uri = format!("bolt://127.0.0.1:{bolt_port}");

        let settings = StoreSettings::new(&uri, "neo4j", TEST_NEO4J_PASSWORD, "neo4j");
        let connection = connect_with_retry(settings).await?;

        Ok(Self {
            _container: container,
            connection,
        })
    }

    /// Get a scoped session against the containerized database.
    pub fn session(&self) -> Result<Session, ClientError> {
        self.connection.session()
    }

    /// Clean all data from the database.
    pub async fn clean(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        clean_db(&self.session()?).await
    }
}

/// Create a Neo4j container image with the given password.
///
/// Pinned version for consistency across runs; memory limits to keep the JVM
/// stable under resource pressure. Connection readiness is verified by
/// `connect_with_retry` rather than stdout parsing.
pub fn neo4j_image(password: &str) -> GenericImage {
    GenericImage::new("neo4j", "5.26.0-community")
        .with_env_var("NEO4J_AUTH", format!("neo4j/{password}"))
        .with_env_var(
            "NEO4J_dbms_connector_bolt_advertised__address",
            "localhost:7687",
        )
        .with_env_var("NEO4J_server_memory_heap_initial__size", "256m")
        .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
        .with_env_var("NEO4J_server_memory_pagecache_size", "128m")
        .with_exposed_port(7687)
        .with_exposed_port(7474)
        .with_wait_for(WaitFor::seconds(5))
}

/// Connect with retry using exponential backoff: 500ms doubling to a 5s cap,
/// up to 30 attempts. Each attempt verifies reachability before returning.
pub async fn connect_with_retry(
    settings: StoreSettings,
) -> Result<Neo4jConnection, Box<dyn std::error::Error + Send + Sync>> {
    let max_attempts = 30;
    let max_delay = Duration::from_secs(5);

    let mut attempt = 0;
    let mut delay = Duration::from_millis(500);
    let mut last_err: Option<String> = None;

    while attempt < max_attempts {
        attempt += 1;

        match Neo4jConnection::open(settings.clone()).await {
            Ok(connection) => {
                tracing::info!(
                    attempt = attempt,
                    uri = settings.uri,
                    "Neo4j connection established and verified"
                );
                return Ok(connection);
            }
            Err(e) => {
                last_err = Some(e.to_string());
            }
        }

        tracing::debug!(
            attempt = attempt,
            delay_ms = delay.as_millis(),
            error = last_err.as_deref().unwrap_or("unknown"),
            "Retrying Neo4j connection"
        );

        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), max_delay);
    }

    Err(format!(
        "Failed to connect to Neo4j at {} after {max_attempts} attempts: {:?}",
        settings.uri, last_err
    )
    .into())
}

/// Clean all data from a Neo4j database.
pub async fn clean_db(session: &Session) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    session
        .run(query("MATCH (n) DETACH DELETE n"))
        .await
        .map_err(|e| format!("Failed to clean database: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires docker (testcontainers)"]
    async fn harness_starts_and_answers_queries() {
        let harness = Neo4jTestHarness::start()
            .await
            .expect("Failed to start Neo4j harness");

        let session = harness.session().expect("session");
        let mut result = session
            .execute(query("RETURN 1 as n"))
            .await
            .expect("Query failed");

        let row = result.next().await.expect("Row error").expect("No result");
        let n: i64 = row.get("n").expect("Column not found");
        assert_eq!(n, 1);
    }

    #[tokio::test]
    #[ignore = "requires docker (testcontainers)"]
    async fn clean_removes_all_data() {
        let harness = Neo4jTestHarness::start()
            .await
            .expect("Failed to start Neo4j harness");
        let session = harness.session().expect("session");

        session
            .run(query("CREATE (:Probe {name: 'probe'})"))
            .await
            .expect("Create failed");

        harness.clean().await.expect("Clean failed");

        let mut result = session
            .execute(query("MATCH (n) RETURN count(n) as count"))
            .await
            .expect("Count query failed");

        let row = result.next().await.expect("Row error").expect("No result");
        let count: i64 = row.get("count").expect("Column not found");
        assert_eq!(count, 0);
    }
}
