//! Neo4j connection management.
//!
//! `Neo4jConnection` owns the single pooled driver handle for one endpoint and
//! hands out scoped [`Session`]s. Release is RAII: dropping the connection (or
//! calling `close`) returns the handle, and sessions release with their scope
//! on every exit path.

use neo4rs::{query, ConfigBuilder, Graph, Query};

use crate::config::StoreSettings;
use crate::error::ClientError;

/// Manages the pooled connection to one Neo4j endpoint.
pub struct Neo4jConnection {
    settings: StoreSettings,
    graph: Option<Graph>,
}

impl Neo4jConnection {
    /// Create an unconnected manager. No I/O happens until `connect()`.
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings,
            graph: None,
        }
    }

    /// Construct and connect in one step, for scope-shaped usage:
    /// open at the top of the scope, drop releases at every exit.
    pub async fn open(settings: StoreSettings) -> Result<Self, ClientError> {
        let mut connection = Self::new(settings);
        connection.connect().await?;
        Ok(connection)
    }

    /// Establish the driver handle and verify reachability.
    ///
    /// No-op when already connected, so repeated calls cannot leak handles.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Connection` if the endpoint is unreachable or the
    /// credentials are rejected.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self.graph.is_some() {
            return Ok(());
        }

        let config = ConfigBuilder::default()
            .uri(&self.settings.uri)
            .user(&self.settings.user)
            .password(&self.settings.password)
            .db(self.settings.database.as_str())
            .build()
            .map_err(ClientError::connection)?;

        let graph = Graph::connect(config)
            .await
            .map_err(ClientError::connection)?;

        // The driver connects lazily; a round-trip proves the endpoint and
        // credentials before any repository call runs.
        graph
            .run(query("RETURN 1"))
            .await
            .map_err(ClientError::connection)?;

        tracing::info!("Connected to Neo4j at {}", self.settings.uri);
        self.graph = Some(graph);
        Ok(())
    }

    /// Get a scoped session bound to the configured database.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Connection` if called before `connect()`.
    pub fn session(&self) -> Result<Session, ClientError> {
        match &self.graph {
            Some(graph) => Ok(Session::new(graph.clone())),
            None => Err(ClientError::connection(
                "not connected to database; call connect() first",
            )),
        }
    }

    /// Release the driver handle. Safe to call multiple times; sessions
    /// already handed out keep their clone until they drop.
    pub fn close(&mut self) {
        if self.graph.take().is_some() {
            tracing::info!("Closed Neo4j connection to {}", self.settings.uri);
        }
    }

    pub fn is_connected(&self) -> bool {
        self.graph.is_some()
    }
}

/// A scoped handle for issuing queries against the configured database.
///
/// Sessions are cheap clones of the pooled handle: acquire one per scope (and
/// per concurrent caller), use it for a few related calls, let it drop.
/// Within one session, queries execute in submission order.
#[derive(Clone)]
pub struct Session {
    graph: Graph,
}

impl Session {
    pub(crate) fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Execute a query that returns no rows (CREATE CONSTRAINT, seed writes).
    pub async fn run(&self, q: Query) -> Result<(), neo4rs::Error> {
        self.graph.run(q).await
    }
}

impl std::ops::Deref for Session {
    type Target = Graph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_before_connect_is_a_connection_error() {
        let connection = Neo4jConnection::new(StoreSettings::new(
            "bolt://localhost:7687",
            "neo4j",
            "password",
            "neo4j",
        ));

        let err = match connection.session() {
            Ok(_) => panic!("session must fail before connect"),
            Err(e) => e,
        };
        assert!(matches!(err, ClientError::Connection { .. }));
    }

    #[test]
    fn close_before_connect_is_a_noop() {
        let mut connection = Neo4jConnection::new(StoreSettings::new(
            "bolt://localhost:7687",
            "neo4j",
            "password",
            "neo4j",
        ));

        assert!(!connection.is_connected());
        connection.close();
        connection.close();
        assert!(!connection.is_connected());
    }
}
