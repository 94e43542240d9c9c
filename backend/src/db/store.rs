//! Entity store abstraction.
//!
//! An [`EntityStore`] is the persistence engine behind a
//! [`Repository`](super::repository::Repository). Stores own persisted state;
//! repositories never cache entities across requests.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;

use super::repository::RepositoryResult;

/// A persisted record with a store-assigned identity.
pub trait Entity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Identity type, assigned by the store on insert.
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;
    /// Typed query value accepted by [`EntityStore::find`].
    type Filter: EntityFilter<Self>;
    /// Insertion payload: every field except the store-assigned ones.
    type Draft: Clone + Send + Sync + 'static;

    /// Human-readable resource name used in messages ("Villa").
    const RESOURCE: &'static str;

    fn id(&self) -> Self::Id;
}

/// Predicate over an entity's attributes.
pub trait EntityFilter<E>: Debug + Send + Sync {
    fn matches(&self, entity: &E) -> bool;
}

/// Persistence operations every store backend provides.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one store instance is shared by all
/// requests.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Check if the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All entities, in store-native order.
    async fn list(&self) -> RepositoryResult<Vec<E>>;

    /// First entity matching `filter`, if any.
    async fn find(&self, filter: &E::Filter) -> RepositoryResult<Option<E>>;

    /// Insert a new entity, assigning its identity and timestamps.
    async fn insert(&self, draft: E::Draft) -> RepositoryResult<E>;

    /// Replace every field of the stored entity with the same identity.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no entity has that identity
    async fn replace(&self, entity: &E) -> RepositoryResult<()>;

    /// Delete the entity with the given identity.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no entity has that identity
    async fn delete(&self, id: E::Id) -> RepositoryResult<()>;
}
