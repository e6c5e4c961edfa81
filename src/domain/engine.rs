//! Cohort derivation.
//!
//! The [`CohortEngine`] borrows a [`CitizenStore`] and a [`DoseLedger`] and
//! computes cohorts from them on demand. It keeps no state of its own, so
//! repeated queries against unchanged data always agree.

use std::collections::HashMap;

use tracing::instrument;

use crate::domain::{CitizenId, CitizenStore, Cohort, CohortKind, DoseLedger, VaccineKind};

/// Number of doses of a single kind that completes a schedule.
pub const FULL_SCHEDULE_DOSES: usize = 2;

/// Read-only view over the registry that derives cohorts.
#[derive(Debug, Clone, Copy)]
pub struct CohortEngine<'a> {
    citizens: &'a CitizenStore,
    doses: &'a DoseLedger,
}

impl<'a> CohortEngine<'a> {
    /// Creates an engine over the given store and ledger.
    #[must_use]
    pub const fn new(citizens: &'a CitizenStore, doses: &'a DoseLedger) -> Self {
        Self { citizens, doses }
    }

    /// The whole population.
    #[must_use]
    pub fn all(&self) -> Cohort {
        self.citizens.ids()
    }

    /// Derives a named cohort.
    #[must_use]
    pub fn cohort(&self, kind: CohortKind) -> Cohort {
        match kind {
            CohortKind::Unvaccinated => self.unvaccinated(),
            CohortKind::FullyVaccinated => self.fully_vaccinated(),
            CohortKind::VaccinatedWith(vaccine) => self.vaccinated_with(vaccine),
            CohortKind::ExclusiveTo(vaccine) => self.exclusive_to(vaccine),
        }
    }

    /// Citizens with at least one dose of `kind`.
    #[must_use]
    pub fn vaccinated_with(&self, kind: VaccineKind) -> Cohort {
        self.doses
            .events_by_kind(kind)
            .map(|event| event.citizen_id)
            .collect()
    }

    /// Citizens with at least one dose of any kind.
    #[must_use]
    pub fn vaccinated(&self) -> Cohort {
        self.vaccinated_with_any(VaccineKind::ALL)
    }

    /// Citizens who completed a schedule of a single vaccine kind.
    ///
    /// Doses are counted per `(citizen, kind)` pair. A citizen with one dose of
    /// each of two kinds has no pair reaching [`FULL_SCHEDULE_DOSES`] and is
    /// not fully vaccinated.
    #[must_use]
    #[instrument(level = "trace", skip(self))]
    pub fn fully_vaccinated(&self) -> Cohort {
        let mut counts: HashMap<(CitizenId, VaccineKind), usize> = HashMap::new();
        for event in self.doses.iter() {
            *counts.entry((event.citizen_id, event.vaccine)).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .filter(|&(_, count)| count >= FULL_SCHEDULE_DOSES)
            .map(|((citizen_id, _), _)| citizen_id)
            .collect()
    }

    /// Citizens without any recorded dose.
    #[must_use]
    pub fn unvaccinated(&self) -> Cohort {
        self.all().difference(&self.vaccinated())
    }

    /// Citizens with doses of `kind` and of no other kind.
    #[must_use]
    pub fn exclusive_to(&self, kind: VaccineKind) -> Cohort {
        self.vaccinated_with(kind)
            .difference(&self.vaccinated_with_any(kind.others()))
    }

    fn vaccinated_with_any(&self, kinds: impl IntoIterator<Item = VaccineKind>) -> Cohort {
        kinds
            .into_iter()
            .fold(Cohort::new(), |acc, kind| acc.union(&self.vaccinated_with(kind)))
    }
}
