//! Entity store implementations.
//!
//! - `local`: In-memory implementation for unit testing and local development
//! - `postgres`: PostgreSQL implementation with Diesel ORM
#[cfg(feature = "local-store")]
pub mod local;
#[cfg(feature = "postgres-store")]
pub mod postgres;

#[cfg(feature = "local-store")]
pub use local::LocalStore;
#[cfg(feature = "postgres-store")]
pub use postgres::{PostgresConfig, PostgresStore};
