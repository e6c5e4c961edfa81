//! Append-only ledger of dose events.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{CitizenId, CitizenStore, DoseEvent, VaccineKind};

/// Every dose administered, in recording order.
///
/// The ledger checks that each event refers to a registered citizen but
/// otherwise accepts events as given. It does not deduplicate and does not
/// limit how many doses a citizen may receive.
#[derive(Debug, Default, Clone)]
pub struct DoseLedger {
    events: Vec<DoseEvent>,

    /// Positions in `events` for each citizen.
    by_citizen: HashMap<CitizenId, Vec<usize>>,
}

/// The dose event refers to a citizen that is not registered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("dose event refers to unknown citizen {0}")]
pub struct UnknownCitizen(pub CitizenId);

impl DoseLedger {
    /// Creates a ledger with room for `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            by_citizen: HashMap::new(),
        }
    }

    /// Appends a dose event.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCitizen`] if `event.citizen_id` is not registered in
    /// `citizens`. The ledger is left unchanged in that case.
    pub fn record(
        &mut self,
        citizens: &CitizenStore,
        event: DoseEvent,
    ) -> Result<(), UnknownCitizen> {
        if !citizens.contains(event.citizen_id) {
            return Err(UnknownCitizen(event.citizen_id));
        }

        let index = self.events.len();
        self.by_citizen
            .entry(event.citizen_id)
            .or_default()
            .push(index);
        self.events.push(event);
        Ok(())
    }

    /// The doses received by a citizen.
    ///
    /// Yields nothing for citizens without doses, including unknown ids.
    pub fn events_for(&self, citizen_id: CitizenId) -> impl Iterator<Item = &DoseEvent> {
        self.by_citizen
            .get(&citizen_id)
            .into_iter()
            .flatten()
            .map(|&index| &self.events[index])
    }

    /// Every dose of the given kind, across all citizens.
    pub fn events_by_kind(&self, kind: VaccineKind) -> impl Iterator<Item = &DoseEvent> {
        self.events.iter().filter(move |event| event.vaccine == kind)
    }

    /// Every recorded dose.
    pub fn iter(&self) -> impl Iterator<Item = &DoseEvent> {
        self.events.iter()
    }

    /// Number of recorded doses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no doses have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
