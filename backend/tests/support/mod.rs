//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use villa_api::api::VillaCreateDto;
use villa_api::db::{
    EntityStore, LocalStore, Repository, RepositoryResult, VillaFilter, VillaStore,
};
use villa_api::models::{NewVilla, Villa, VillaId};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn create_dto(name: &str) -> VillaCreateDto {
    VillaCreateDto {
        name: name.to_string(),
        details: "Ocean front".to_string(),
        rate: 250.0,
        occupancy: 4,
        sqft: 600,
        image_url: "https://img.example/villa.jpg".to_string(),
        amenity: "Pool".to_string(),
    }
}

pub fn seed(store: &LocalStore, name: &str) -> VillaId {
    store.insert_villa(NewVilla::from(create_dto(name)))
}

/// A fresh request-scoped repository over `store`.
pub fn repository<S>(store: &S) -> Repository<Villa>
where
    S: EntityStore<Villa> + Clone + 'static,
{
    Repository::new(Arc::new(store.clone()) as VillaStore)
}

/// Store wrapper that holds every by-name lookup until `parties` lookups
/// have completed, so concurrent duplicate checks all run before any insert.
#[derive(Clone)]
pub struct GatedStore {
    pub inner: LocalStore,
    barrier: Arc<Barrier>,
}

impl GatedStore {
    pub fn new(inner: LocalStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(parties)),
        }
    }
}

#[async_trait]
impl EntityStore<Villa> for GatedStore {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.health_check().await
    }

    async fn list(&self) -> RepositoryResult<Vec<Villa>> {
        self.inner.list().await
    }

    async fn find(&self, filter: &VillaFilter) -> RepositoryResult<Option<Villa>> {
        let found = self.inner.find(filter).await?;
        if matches!(filter, VillaFilter::ByName(_)) {
            self.barrier.wait().await;
        }
        Ok(found)
    }

    async fn insert(&self, draft: NewVilla) -> RepositoryResult<Villa> {
        self.inner.insert(draft).await
    }

    async fn replace(&self, villa: &Villa) -> RepositoryResult<()> {
        self.inner.replace(villa).await
    }

    async fn delete(&self, id: VillaId) -> RepositoryResult<()> {
        self.inner.delete(id).await
    }
}
