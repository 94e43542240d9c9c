//! Per-request change tracking.

use std::collections::HashMap;

use crate::db::store::Entity;

/// One tracked entity: the state last known to match the store, and the
/// current (possibly edited) state.
#[derive(Debug, Clone)]
struct Entry<E> {
    /// `None` when the entity was attached for update without a prior read.
    original: Option<E>,
    current: E,
}

impl<E: PartialEq> Entry<E> {
    fn is_dirty(&self) -> bool {
        self.original.as_ref() != Some(&self.current)
    }
}

/// Identity map of entities attached to a single request.
///
/// A unit of work must not outlive the request that created it.
#[derive(Debug)]
pub struct UnitOfWork<E: Entity> {
    entries: HashMap<E::Id, Entry<E>>,
}

impl<E: Entity> UnitOfWork<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Attach an entity read from the store, unless its identity is already
    /// tracked. Returns the tracked instance.
    pub fn attach_unchanged(&mut self, entity: E) -> &E {
        let entry = self.entries.entry(entity.id()).or_insert_with(|| Entry {
            original: Some(entity.clone()),
            current: entity,
        });
        &entry.current
    }

    /// Attach an entity as the new desired state for its identity.
    pub fn attach_modified(&mut self, entity: E) {
        match self.entries.get_mut(&entity.id()) {
            Some(entry) => entry.current = entity,
            None => {
                self.entries.insert(
                    entity.id(),
                    Entry {
                        original: None,
                        current: entity,
                    },
                );
            }
        }
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.entries.get(id).map(|entry| &entry.current)
    }

    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.entries.get_mut(id).map(|entry| &mut entry.current)
    }

    pub fn detach(&mut self, id: &E::Id) -> Option<E> {
        self.entries.remove(id).map(|entry| entry.current)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of every entity whose current state differs from the store.
    pub fn pending_changes(&self) -> Vec<E> {
        self.entries
            .values()
            .filter(|entry| entry.is_dirty())
            .map(|entry| entry.current.clone())
            .collect()
    }

    /// Drop unsaved changes for `id`. An entity that was never read is
    /// forgotten entirely; a read one returns to its last saved state.
    pub fn revert(&mut self, id: &E::Id) {
        match self.entries.get(id).map(|entry| entry.original.clone()) {
            Some(Some(original)) => {
                if let Some(entry) = self.entries.get_mut(id) {
                    entry.current = original;
                }
            }
            Some(None) => {
                self.entries.remove(id);
            }
            None => {}
        }
    }

    /// Record that `entity` now matches the store.
    pub fn mark_saved(&mut self, entity: &E) {
        if let Some(entry) = self.entries.get_mut(&entity.id()) {
            entry.original = Some(entity.clone());
        }
    }
}

impl<E: Entity> Default for UnitOfWork<E> {
    fn default() -> Self {
        Self::new()
    }
}
