//! Seeded generator for demonstration feeds.

use std::num::NonZeroU32;

use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    domain::{Citizen, CitizenId, DoseEvent, VaccineKind},
    storage::Feed,
};

/// Shape of a generated population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticParams {
    /// Number of citizens, numbered from 1.
    pub citizens: u64,
    /// Citizens given a first dose of each vaccine kind.
    pub per_kind: usize,
    /// Doses are dated in the months before this day.
    pub reference_date: NaiveDate,
}

impl SyntheticParams {
    /// The default population of 500 citizens with 75 per vaccine kind.
    #[must_use]
    pub const fn new(reference_date: NaiveDate) -> Self {
        Self {
            citizens: 500,
            per_kind: 75,
            reference_date,
        }
    }
}

const FIRST_DOSE: NonZeroU32 = NonZeroU32::MIN;
const SECOND_DOSE: NonZeroU32 = NonZeroU32::MIN.saturating_add(1);

/// Chance that a citizen who received a first dose also received a second.
const fn second_dose_probability(kind: VaccineKind) -> f64 {
    match kind {
        VaccineKind::Pfizer => 0.70,
        VaccineKind::AstraZeneca => 0.75,
    }
}

/// Generates a feed.
///
/// Each vaccine kind is given to `per_kind` citizens drawn from those who
/// have not yet received any vaccine, so generated citizens never mix
/// brands. The same seed always yields the same feed.
#[must_use]
pub fn generate(params: &SyntheticParams, seed: u64) -> Feed {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let citizens: Vec<Citizen> = (1..=params.citizens)
        .map(|i| Citizen::new(i, format!("Citizen {i}"), format!("17{i:08}")))
        .collect();

    let mut available: Vec<CitizenId> = citizens.iter().map(Citizen::id).collect();
    let mut doses = Vec::new();

    for kind in VaccineKind::ALL {
        available.shuffle(&mut rng);
        let take = params.per_kind.min(available.len());
        let mut chosen: Vec<CitizenId> = available.drain(..take).collect();
        chosen.sort_unstable();

        for citizen_id in chosen {
            let first_date = params.reference_date - Days::new(rng.gen_range(30..180));
            doses.push(DoseEvent::new(citizen_id, kind, first_date, FIRST_DOSE));

            if rng.gen_bool(second_dose_probability(kind)) {
                let second_date =
                    (first_date + Days::new(rng.gen_range(21..=84))).min(params.reference_date);
                doses.push(DoseEvent::new(citizen_id, kind, second_date, SECOND_DOSE));
            }
        }
    }

    debug!(
        citizens = citizens.len(),
        doses = doses.len(),
        seed,
        "generated synthetic feed"
    );

    Feed { citizens, doses }
}
