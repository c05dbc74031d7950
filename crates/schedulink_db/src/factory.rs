//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use schedulink_config::{AppConfig, DatabaseConfig};
use tracing::debug;

/// Factory for creating database clients from the different configuration sources.
#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a client from the application configuration.
    ///
    /// # Errors
    ///
    /// * The database configuration is missing
    /// * The database URL is missing
    /// * The database connection fails
    pub async fn from_app_config(&self, config: &AppConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");

        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        self.from_db_config(db_config).await
    }

    /// Create a client from a database configuration.
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from database configuration");
        DbClient::from_config(db_config).await
    }

    /// Create a client from a database URL.
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn app_config_without_database_is_rejected() {
        let err = DbClientFactory::new()
            .from_app_config(&AppConfig::in_memory())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConfigError(_)));
    }

    #[tokio::test]
    async fn builds_client_from_each_source() {
        let factory = DbClientFactory::new();
        let from_config = factory
            .from_app_config(&AppConfig::with_database("sqlite::memory:"))
            .await
            .unwrap();
        assert!(from_config.is_healthy().await);

        let from_url = factory.from_url("sqlite::memory:").await.unwrap();
        assert!(from_url.is_healthy().await);
    }
}
