//! Identity-keyed registry of citizens.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{Citizen, CitizenId, Cohort};

/// An in-memory registry of citizens keyed by [`CitizenId`].
///
/// Citizens can be added but never edited or removed.
#[derive(Debug, Default, Clone)]
pub struct CitizenStore {
    citizens: HashMap<CitizenId, Citizen>,
}

/// A citizen with this id is already registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("citizen {0} is already registered")]
pub struct DuplicateIdentity(pub CitizenId);

/// No citizen with this id is registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("citizen {0} not found")]
pub struct NotFound(pub CitizenId);

impl CitizenStore {
    /// Creates a store with room for `capacity` citizens.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            citizens: HashMap::with_capacity(capacity),
        }
    }

    /// Registers a citizen.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdentity`] if a citizen with the same id is already
    /// registered. The store is left unchanged in that case, even if the new
    /// record's other fields differ.
    pub fn register(&mut self, citizen: Citizen) -> Result<(), DuplicateIdentity> {
        use std::collections::hash_map::Entry;

        match self.citizens.entry(citizen.id()) {
            Entry::Occupied(entry) => Err(DuplicateIdentity(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(citizen);
                Ok(())
            }
        }
    }

    /// Looks up a citizen by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no citizen has this id.
    pub fn get(&self, id: CitizenId) -> Result<&Citizen, NotFound> {
        self.citizens.get(&id).ok_or(NotFound(id))
    }

    /// Whether a citizen with this id is registered.
    #[must_use]
    pub fn contains(&self, id: CitizenId) -> bool {
        self.citizens.contains_key(&id)
    }

    /// Iterates over every registered citizen, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Citizen> {
        self.citizens.values()
    }

    /// The whole population as a cohort.
    #[must_use]
    pub fn ids(&self) -> Cohort {
        self.citizens.keys().copied().collect()
    }

    /// Number of registered citizens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.citizens.len()
    }

    /// Whether no citizens are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.citizens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_get() {
        let mut store = CitizenStore::default();
        store
            .register(Citizen::new(1, "Ada", "1700000001"))
            .unwrap();

        let citizen = store.get(CitizenId::new(1)).unwrap();
        assert_eq!(citizen.name(), "Ada");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_id_is_rejected_and_store_unchanged() {
        let mut store = CitizenStore::default();
        store
            .register(Citizen::new(1, "Ada", "1700000001"))
            .unwrap();

        let err = store
            .register(Citizen::new(1, "Someone Else", "1799999999"))
            .unwrap_err();

        assert_eq!(err, DuplicateIdentity(CitizenId::new(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(CitizenId::new(1)).unwrap().name(), "Ada");
    }

    #[test]
    fn identical_attributes_with_distinct_ids_are_distinct_citizens() {
        let mut store = CitizenStore::default();
        store.register(Citizen::new(1, "Ada", "17")).unwrap();
        store.register(Citizen::new(2, "Ada", "17")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.all().count(), 2);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = CitizenStore::default();
        assert_eq!(
            store.get(CitizenId::new(5)).unwrap_err(),
            NotFound(CitizenId::new(5))
        );
        assert!(!store.contains(CitizenId::new(5)));
    }

    #[test]
    fn ids_lists_the_whole_population() {
        let mut store = CitizenStore::with_capacity(3);
        for id in [3, 1, 2] {
            store
                .register(Citizen::new(id, format!("Citizen {id}"), "17"))
                .unwrap();
        }

        let ids: Vec<u64> = store.ids().iter().map(CitizenId::get).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
