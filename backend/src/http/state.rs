//! Application state for the HTTP server.

use crate::db::{Repository, VillaStore};
use crate::models::Villa;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store shared by every request
    pub store: VillaStore,
}

impl AppState {
    /// Create a new application state with the given store.
    pub fn new(store: VillaStore) -> Self {
        Self { store }
    }

    /// A fresh repository, and with it a fresh unit of work, for one request.
    pub fn repository(&self) -> Repository<Villa> {
        Repository::new(self.store.clone())
    }
}
