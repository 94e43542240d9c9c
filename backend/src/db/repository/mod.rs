//! Generic repository over an [`EntityStore`].
//!
//! A [`Repository`] is the only component that talks to a store. It is built
//! fresh for every request and owns that request's [`UnitOfWork`]:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  Request handler             │
//! └──────────────┬───────────────┘
//!                │ get / create / update / remove
//! ┌──────────────▼───────────────┐
//! │  Repository<E>               │──── UnitOfWork<E> (tracked entities)
//! └──────────────┬───────────────┘
//!                │ list / find / insert / replace / delete
//! ┌──────────────▼───────────────┐
//! │  Arc<dyn EntityStore<E>>     │  LocalStore | PostgresStore
//! └──────────────────────────────┘
//! ```
//!
//! # Tracking
//!
//! Reads take an explicit [`Tracking`] mode. A tracked read registers the
//! entity in the unit of work; edits made through
//! [`Repository::tracked_mut`] are written back by the next [`Repository::save`]
//! (every mutation saves). An untracked read returns an owned snapshot that
//! the repository forgets immediately, so building an update payload from it
//! can never flush a stale copy.

pub mod error;
pub mod unit_of_work;

use std::sync::Arc;

use log::debug;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use unit_of_work::UnitOfWork;

use super::store::{Entity, EntityStore};

/// Whether a read attaches its result to the request's unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tracking {
    /// Attach the entity; pending edits are flushed on save.
    #[default]
    Tracked,
    /// Return a detached snapshot.
    Untracked,
}

/// Request-scoped data access over a shared store.
pub struct Repository<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    unit_of_work: UnitOfWork<E>,
}

impl<E: Entity> Repository<E> {
    /// Create a repository with an empty unit of work.
    pub fn new(store: Arc<dyn EntityStore<E>>) -> Self {
        Self {
            store,
            unit_of_work: UnitOfWork::new(),
        }
    }

    pub async fn health_check(&self) -> RepositoryResult<bool> {
        self.store.health_check().await
    }

    /// All entities in store-native order. Never tracked.
    pub async fn get_all(&self) -> RepositoryResult<Vec<E>> {
        self.store.list().await
    }

    /// First entity matching `filter`.
    ///
    /// `filter` is evaluated by the store against persisted state. With
    /// [`Tracking::Tracked`], an identity already in the unit of work is
    /// returned as tracked, local edits included, so the result need not
    /// satisfy `filter` any more (a `ByName("Lake")` lookup can return a
    /// villa renamed to "Sea" in this request).
    pub async fn get(
        &mut self,
        filter: &E::Filter,
        tracking: Tracking,
    ) -> RepositoryResult<Option<E>> {
        let found = self.store.find(filter).await?;
        Ok(match (found, tracking) {
            (None, _) => None,
            (Some(entity), Tracking::Untracked) => Some(entity),
            (Some(entity), Tracking::Tracked) => {
                Some(self.unit_of_work.attach_unchanged(entity).clone())
            }
        })
    }

    /// Insert a new entity and track the stored result.
    ///
    /// Pending changes are flushed first, so a failure never follows a
    /// successful insert. Uniqueness of business keys is the caller's concern.
    pub async fn create(&mut self, draft: E::Draft) -> RepositoryResult<E> {
        self.save().await?;
        let created = self.store.insert(draft).await?;
        debug!("Created {} {}", E::RESOURCE, created.id());
        self.unit_of_work.attach_unchanged(created.clone());
        Ok(created)
    }

    /// Replace the stored entity with the same identity and save.
    ///
    /// Timestamps are written exactly as given. If the save fails, the
    /// replacement is dropped from the unit of work.
    pub async fn update(&mut self, entity: E) -> RepositoryResult<()> {
        let id = entity.id();
        debug!("Updating {} {}", E::RESOURCE, id);
        self.unit_of_work.attach_modified(entity);
        if let Err(err) = self.save().await {
            self.unit_of_work.revert(&id);
            return Err(err);
        }
        Ok(())
    }

    /// Delete the entity with the same identity.
    ///
    /// Pending changes are flushed first, as in [`Repository::create`].
    pub async fn remove(&mut self, entity: &E) -> RepositoryResult<()> {
        let id = entity.id();
        self.save().await?;
        self.store.delete(id).await?;
        self.unit_of_work.detach(&id);
        debug!("Removed {} {}", E::RESOURCE, id);
        Ok(())
    }

    /// Write every tracked entity with pending changes back to the store.
    ///
    /// Stops at the first failure. An entity the store no longer has is
    /// detached, so it is not retried by later saves.
    ///
    /// # Returns
    /// The number of entities written.
    pub async fn save(&mut self) -> RepositoryResult<usize> {
        let pending = self.unit_of_work.pending_changes();
        for entity in &pending {
            if let Err(err) = self.store.replace(entity).await {
                if err.is_not_found() {
                    self.unit_of_work.detach(&entity.id());
                }
                return Err(err);
            }
            self.unit_of_work.mark_saved(entity);
        }
        if !pending.is_empty() {
            debug!("Saved {} tracked {} change(s)", pending.len(), E::RESOURCE);
        }
        Ok(pending.len())
    }

    /// Mutable access to a tracked entity. Edits are persisted by the next save.
    pub fn tracked_mut(&mut self, id: E::Id) -> Option<&mut E> {
        self.unit_of_work.get_mut(&id)
    }

    pub fn is_tracked(&self, id: E::Id) -> bool {
        self.unit_of_work.contains(&id)
    }

    pub fn tracked_count(&self) -> usize {
        self.unit_of_work.len()
    }
}
