//! Store factory for dependency injection.
//!
//! This module provides utilities for creating and configuring store instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
#[cfg(any(feature = "local-store", feature = "postgres-store"))]
use std::sync::Arc;

use log::info;

use super::config::StoreConfig;
use super::repository::{RepositoryError, RepositoryResult};
#[cfg(feature = "local-store")]
use super::stores::LocalStore;
#[cfg(feature = "postgres-store")]
use super::stores::PostgresStore;
use super::{PostgresConfig, VillaStore};

/// Store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local store
    Local,
}

impl FromStr for StoreType {
    type Err = String;

    /// Parse store type from string ("postgres", "pg", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown store type: {}", s)),
        }
    }
}

impl StoreType {
    /// Get store type from environment variables.
    ///
    /// Reads `STORE_TYPE`. Without it, defaults to Postgres if a database URL
    /// is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("STORE_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Factory for creating store instances.
///
/// # Example
/// ```ignore
/// use villa_api::db::{StoreFactory, StoreType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let local = StoreFactory::create(StoreType::Local, None).await?;
///     assert!(local.health_check().await?);
///     Ok(())
/// }
/// ```
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store instance based on type.
    ///
    /// # Arguments
    /// * `store_type` - Type of store to create
    /// * `postgres_config` - Optional database configuration (required for Postgres)
    pub async fn create(
        store_type: StoreType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<VillaStore> {
        match store_type {
            StoreType::Postgres => {
                #[cfg(feature = "postgres-store")]
                {
                    let config = postgres_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres store requires PostgresConfig",
                        )
                    })?;
                    Self::create_postgres(config).await
                }
                #[cfg(not(feature = "postgres-store"))]
                {
                    let _ = postgres_config;
                    Err(RepositoryError::configuration(
                        "Postgres store feature not enabled",
                    ))
                }
            }
            StoreType::Local => Self::try_create_local(),
        }
    }

    /// Create a Postgres store, running migrations on a blocking thread.
    #[cfg(feature = "postgres-store")]
    pub async fn create_postgres(config: &PostgresConfig) -> RepositoryResult<VillaStore> {
        let config = config.clone();
        let store = tokio::task::spawn_blocking(move || PostgresStore::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        info!("Postgres store ready");
        Ok(Arc::new(store))
    }

    /// Create an in-memory local store.
    #[cfg(feature = "local-store")]
    pub fn create_local() -> VillaStore {
        Arc::new(LocalStore::new())
    }

    fn try_create_local() -> RepositoryResult<VillaStore> {
        #[cfg(feature = "local-store")]
        {
            info!("Using in-memory local store");
            Ok(Self::create_local())
        }
        #[cfg(not(feature = "local-store"))]
        {
            Err(RepositoryError::configuration(
                "Local store feature not enabled",
            ))
        }
    }

    /// Create a store from environment configuration.
    ///
    /// See [`StoreType::from_env`] and `PostgresConfig::from_env`.
    pub async fn from_env() -> RepositoryResult<VillaStore> {
        match StoreType::from_env() {
            StoreType::Postgres => {
                #[cfg(feature = "postgres-store")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    Self::create_postgres(&config).await
                }
                #[cfg(not(feature = "postgres-store"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres store feature not enabled",
                    ))
                }
            }
            StoreType::Local => Self::try_create_local(),
        }
    }

    /// Create a store from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(config_path: P) -> RepositoryResult<VillaStore> {
        let config = StoreConfig::from_file(config_path)?;
        Self::from_store_config(&config).await
    }

    /// Create a store from `store.toml` in the default search locations.
    pub async fn from_default_config() -> RepositoryResult<VillaStore> {
        let config = StoreConfig::from_default_location()?;
        Self::from_store_config(&config).await
    }

    /// Create a store from a parsed [`StoreConfig`].
    pub async fn from_store_config(config: &StoreConfig) -> RepositoryResult<VillaStore> {
        let store_type = config.store_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid store type: {}", e))
        })?;
        let pg_config = config.to_postgres_config()?;
        Self::create(store_type, pg_config.as_ref()).await
    }
}

/// Builder for configuring store creation.
///
/// # Example
/// ```ignore
/// use villa_api::db::{StoreBuilder, StoreType};
///
/// let store = StoreBuilder::new()
///     .store_type(StoreType::Local)
///     .build()
///     .await?;
/// ```
pub struct StoreBuilder {
    store_type: StoreType,
    #[cfg(feature = "postgres-store")]
    postgres_config: Option<PostgresConfig>,
}

impl StoreBuilder {
    /// Create a new builder. The store type starts as [`StoreType::from_env`].
    pub fn new() -> Self {
        Self {
            store_type: StoreType::from_env(),
            #[cfg(feature = "postgres-store")]
            postgres_config: None,
        }
    }

    /// Set the store type.
    pub fn store_type(mut self, store_type: StoreType) -> Self {
        self.store_type = store_type;
        self
    }

    /// Set the Postgres configuration.
    #[cfg(feature = "postgres-store")]
    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    /// Load store type and Postgres settings from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(mut self, config_path: P) -> RepositoryResult<Self> {
        let config = StoreConfig::from_file(config_path)?;
        self.store_type = config.store_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid store type: {}", e))
        })?;
        #[cfg(feature = "postgres-store")]
        {
            self.postgres_config = config.to_postgres_config()?;
        }
        #[cfg(not(feature = "postgres-store"))]
        {
            config.to_postgres_config()?;
        }
        Ok(self)
    }

    /// Build the store instance.
    pub async fn build(self) -> RepositoryResult<VillaStore> {
        #[cfg(feature = "postgres-store")]
        let pg_config = self.postgres_config.as_ref();
        #[cfg(not(feature = "postgres-store"))]
        let pg_config = None;

        StoreFactory::create(self.store_type, pg_config).await
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::EntityStore;

    #[test]
    fn test_store_type_from_str() {
        assert_eq!(StoreType::from_str("local").unwrap(), StoreType::Local);
        assert_eq!(StoreType::from_str("postgres").unwrap(), StoreType::Postgres);
        assert_eq!(StoreType::from_str("Pg").unwrap(), StoreType::Postgres);
        assert!(StoreType::from_str("sqlite").is_err());
    }

    #[cfg(feature = "local-store")]
    #[tokio::test]
    async fn test_create_local_store() {
        let store = StoreFactory::create(StoreType::Local, None).await.unwrap();
        assert!(store.health_check().await.unwrap());
    }

    #[cfg(feature = "local-store")]
    #[tokio::test]
    async fn test_builder_local_store() {
        let store = StoreBuilder::new()
            .store_type(StoreType::Local)
            .build()
            .await
            .unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[cfg(not(feature = "postgres-store"))]
    #[tokio::test]
    async fn test_postgres_without_feature_is_configuration_error() {
        let err = StoreFactory::create(StoreType::Postgres, None)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }
}
