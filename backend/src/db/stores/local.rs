//! In-memory local store implementation.
//!
//! This module provides a local implementation of [`EntityStore`] for villas,
//! suitable for unit testing and local development. Data lives in a
//! `BTreeMap` keyed by id, so listing order is insertion order.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::filter::VillaFilter;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::store::{EntityFilter, EntityStore};
use crate::models::{NewVilla, Villa, VillaId};

/// In-memory villa store.
///
/// Cloning is cheap and clones share the same data, so a test can keep a
/// handle for inspection while the repository under test owns another.
///
/// # Example
/// ```
/// use villa_api::db::stores::LocalStore;
/// use villa_api::models::NewVilla;
///
/// let store = LocalStore::new();
/// let id = store.insert_villa(NewVilla {
///     name: "Royal Villa".to_string(),
///     details: "Sea view".to_string(),
///     rate: 200.0,
///     sqft: 550,
///     occupancy: 4,
///     image_url: String::new(),
///     amenity: String::new(),
/// });
/// assert_eq!(store.villa(id).unwrap().name, "Royal Villa");
/// ```
#[derive(Clone)]
pub struct LocalStore {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    villas: BTreeMap<VillaId, Villa>,
    next_villa_id: VillaId,
    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            villas: BTreeMap::new(),
            next_villa_id: VillaId(1),
            is_healthy: true,
        }
    }
}

impl LocalStore {
    /// Create a new empty local store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Insert a villa synchronously, bypassing any repository.
    ///
    /// This is a helper for setting up data.
    pub fn insert_villa(&self, draft: NewVilla) -> VillaId {
        let mut data = self.data.write();
        Self::insert_locked(&mut data, draft).id
    }

    /// Current stored state of a villa.
    pub fn villa(&self, id: VillaId) -> Option<Villa> {
        self.data.read().villas.get(&id).cloned()
    }

    /// Get the number of villas stored.
    pub fn villa_count(&self) -> usize {
        self.data.read().villas.len()
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the store. Ids restart at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    fn insert_locked(data: &mut LocalData, draft: NewVilla) -> Villa {
        let id = data.next_villa_id;
        data.next_villa_id = VillaId(id.0 + 1);
        let villa = draft.into_villa(id, Utc::now());
        data.villas.insert(id, villa.clone());
        villa
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation).with_entity("villa"),
            ));
        }
        Ok(())
    }

    fn not_found(operation: &str, id: VillaId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Villa {} not found", id),
            ErrorContext::new(operation)
                .with_entity("villa")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore<Villa> for LocalStore {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list(&self) -> RepositoryResult<Vec<Villa>> {
        self.check_health("list")?;
        Ok(self.data.read().villas.values().cloned().collect())
    }

    async fn find(&self, filter: &VillaFilter) -> RepositoryResult<Option<Villa>> {
        self.check_health("find")?;
        let data = self.data.read();
        let found = match filter {
            VillaFilter::ById(id) => data.villas.get(id).cloned(),
            VillaFilter::ByName(_) => data.villas.values().find(|v| filter.matches(v)).cloned(),
        };
        debug!("find {:?} -> {}", filter, found.is_some());
        Ok(found)
    }

    async fn insert(&self, draft: NewVilla) -> RepositoryResult<Villa> {
        self.check_health("insert")?;
        let mut data = self.data.write();
        Ok(Self::insert_locked(&mut data, draft))
    }

    async fn replace(&self, villa: &Villa) -> RepositoryResult<()> {
        self.check_health("replace")?;
        let mut data = self.data.write();
        match data.villas.get_mut(&villa.id) {
            Some(stored) => {
                *stored = villa.clone();
                Ok(())
            }
            None => Err(Self::not_found("replace", villa.id)),
        }
    }

    async fn delete(&self, id: VillaId) -> RepositoryResult<()> {
        self.check_health("delete")?;
        let mut data = self.data.write();
        match data.villas.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found("delete", id)),
        }
    }
}
