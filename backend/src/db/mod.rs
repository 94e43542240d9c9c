//! Database module for villa storage.
//!
//! This module provides the data-access layer: a store abstraction with
//! swappable backends and a request-scoped [`Repository`] on top of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (services/) - envelopes and validation   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository (repository/) - tracking, unit of work      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  EntityStore trait (store.rs) - Abstract Interface      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ LocalStore    │ PostgresStore│
//!     │ (in-memory)   │ (Diesel)     │
//!     └──────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use villa_api::db::{StoreFactory, Repository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StoreFactory::from_env().await?;
//!     let repo = Repository::new(store);
//!     let villas = repo.get_all().await?;
//!     Ok(())
//! }
//! ```

// Feature flag priority: postgres > local
#[cfg(not(any(feature = "postgres-store", feature = "local-store")))]
compile_error!("Enable at least one store backend feature.");

pub mod config;
pub mod factory;
pub mod filter;
pub mod repository;
pub mod store;
pub mod stores;

#[cfg(feature = "postgres-store")]
pub use stores::PostgresConfig;
#[cfg(not(feature = "postgres-store"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use config::StoreConfig;
pub use factory::{StoreBuilder, StoreFactory, StoreType};
pub use filter::VillaFilter;
pub use repository::{
    ErrorContext, Repository, RepositoryError, RepositoryResult, Tracking, UnitOfWork,
};
pub use store::{Entity, EntityFilter, EntityStore};
#[cfg(feature = "local-store")]
pub use stores::LocalStore;
#[cfg(feature = "postgres-store")]
pub use stores::PostgresStore;

use std::sync::Arc;

use crate::models::Villa;

/// Shared handle to the villa store.
pub type VillaStore = Arc<dyn EntityStore<Villa>>;
