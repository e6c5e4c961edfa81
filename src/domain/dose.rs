use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CitizenId, VaccineKind};

/// A single administration of a vaccine dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseEvent {
    /// The citizen who received the dose.
    pub citizen_id: CitizenId,
    /// The brand administered.
    pub vaccine: VaccineKind,
    /// Date of administration.
    pub date: NaiveDate,
    /// Position of this dose in the citizen's schedule, starting at 1.
    pub dose_number: NonZeroU32,
}

impl DoseEvent {
    /// Creates a new dose event.
    #[must_use]
    pub const fn new(
        citizen_id: CitizenId,
        vaccine: VaccineKind,
        date: NaiveDate,
        dose_number: NonZeroU32,
    ) -> Self {
        Self {
            citizen_id,
            vaccine,
            date,
            dose_number,
        }
    }
}
