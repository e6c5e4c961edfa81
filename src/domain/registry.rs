use tracing::{debug, instrument};

use crate::domain::{
    Citizen, CitizenStore, CohortEngine, DoseEvent, DoseLedger, DuplicateIdentity, UnknownCitizen,
};

/// The citizens and doses of one snapshot.
///
/// The registry owns both collections for its whole lifetime and is the
/// only way to add doses, so every recorded dose is checked against the
/// citizens registered so far.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    citizens: CitizenStore,
    doses: DoseLedger,
}

impl Registry {
    /// Creates an empty registry sized for the expected snapshot.
    #[must_use]
    pub fn with_capacity(citizens: usize, doses: usize) -> Self {
        Self {
            citizens: CitizenStore::with_capacity(citizens),
            doses: DoseLedger::with_capacity(doses),
        }
    }

    /// Registers a citizen.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdentity`] if the id is already registered.
    #[instrument(level = "trace", skip(self), fields(id = %citizen.id()))]
    pub fn register(&mut self, citizen: Citizen) -> Result<(), DuplicateIdentity> {
        self.citizens.register(citizen).inspect_err(|e| debug!("{e}"))
    }

    /// Records a dose.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCitizen`] if the dose refers to an unregistered
    /// citizen.
    #[instrument(level = "trace", skip(self), fields(citizen = %event.citizen_id))]
    pub fn record_dose(&mut self, event: DoseEvent) -> Result<(), UnknownCitizen> {
        self.doses
            .record(&self.citizens, event)
            .inspect_err(|e| debug!("{e}"))
    }

    /// The registered citizens.
    #[must_use]
    pub const fn citizens(&self) -> &CitizenStore {
        &self.citizens
    }

    /// The recorded doses.
    #[must_use]
    pub const fn doses(&self) -> &DoseLedger {
        &self.doses
    }

    /// A cohort engine over the current contents.
    #[must_use]
    pub const fn cohorts(&self) -> CohortEngine<'_> {
        CohortEngine::new(&self.citizens, &self.doses)
    }
}
