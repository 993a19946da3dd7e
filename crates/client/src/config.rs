//! Endpoint settings for the graph store.

/// Connection settings for one Neo4j endpoint.
///
/// The data-access layer needs exactly these four values; how they are sourced
/// (environment, config file, CLI) is the caller's concern. `from_env` covers
/// the common environment-variable case.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Bolt URI (e.g., `bolt://localhost:7687`)
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Target database name
    pub database: String,
}

impl StoreSettings {
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// Load settings from `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`, and
    /// `NEO4J_DATABASE`, falling back to local-development defaults.
    ///
    /// A `.env` file in the working directory is honored if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            uri: std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".into()),
            user: std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".into()),
            password: std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "password".into()),
            database: std::env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".into()),
        }
    }
}
