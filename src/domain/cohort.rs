//! Derived subsets of the population.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::domain::{CitizenId, VaccineKind, vaccine::UnknownVaccineKind};

/// A set of citizen identities.
///
/// Cohorts hold ids only, never citizen records, and are recomputed on every
/// query. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cohort {
    members: BTreeSet<CitizenId>,
}

impl Cohort {
    /// An empty cohort.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cohort has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over member ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CitizenId> + '_ {
        self.members.iter().copied()
    }

    /// Members of either cohort.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.members.union(&other.members).copied().collect()
    }

    /// Members of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.members.difference(&other.members).copied().collect()
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.members.is_subset(&other.members)
    }

    /// Whether the two cohorts share no members.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.members.is_disjoint(&other.members)
    }
}

impl FromIterator<CitizenId> for Cohort {
    fn from_iter<T: IntoIterator<Item = CitizenId>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Cohort {
    type Item = CitizenId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, CitizenId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter().copied()
    }
}

/// The named cohorts the engine knows how to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CohortKind {
    /// Citizens with no recorded dose of any kind.
    Unvaccinated,
    /// Citizens with at least two doses of one single kind.
    FullyVaccinated,
    /// Citizens with at least one dose of the given kind.
    VaccinatedWith(VaccineKind),
    /// Citizens with doses of the given kind and of no other kind.
    ExclusiveTo(VaccineKind),
}

impl CohortKind {
    /// The cohorts that make up a standard report, in report order.
    #[must_use]
    pub fn standard() -> Vec<Self> {
        let mut kinds = vec![Self::Unvaccinated, Self::FullyVaccinated];
        kinds.extend(VaccineKind::ALL.into_iter().map(Self::ExclusiveTo));
        kinds
    }

    /// Section title used in exported reports.
    #[must_use]
    pub fn title(self) -> String {
        match self {
            Self::Unvaccinated => "UNVACCINATED CITIZENS".to_string(),
            Self::FullyVaccinated => "FULLY VACCINATED CITIZENS".to_string(),
            Self::VaccinatedWith(kind) => {
                format!("CITIZENS VACCINATED WITH {}", kind.name().to_uppercase())
            }
            Self::ExclusiveTo(kind) => {
                format!("CITIZENS ONLY VACCINATED WITH {}", kind.name().to_uppercase())
            }
        }
    }

    /// Short label used in summaries.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Unvaccinated => "Unvaccinated".to_string(),
            Self::FullyVaccinated => "Fully vaccinated".to_string(),
            Self::VaccinatedWith(kind) => format!("Vaccinated with {kind}"),
            Self::ExclusiveTo(kind) => format!("Exclusive {kind}"),
        }
    }
}

impl fmt::Display for CohortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unvaccinated => f.write_str("unvaccinated"),
            Self::FullyVaccinated => f.write_str("fully-vaccinated"),
            Self::VaccinatedWith(kind) => write!(f, "{}", kind.name().to_lowercase()),
            Self::ExclusiveTo(kind) => write!(f, "only-{}", kind.name().to_lowercase()),
        }
    }
}

/// The given string does not name a cohort.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CohortParseError {
    /// Not one of the fixed cohort names.
    #[error(
        "unknown cohort '{0}' (expected unvaccinated, fully-vaccinated, <vaccine> or only-<vaccine>)"
    )]
    Unknown(String),
    /// A per-vaccine cohort naming an unknown vaccine.
    #[error(transparent)]
    Vaccine(#[from] UnknownVaccineKind),
}

impl FromStr for CohortKind {
    type Err = CohortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "" => Err(CohortParseError::Unknown(s.to_string())),
            "unvaccinated" => Ok(Self::Unvaccinated),
            "fully-vaccinated" | "fully" => Ok(Self::FullyVaccinated),
            other => match other.strip_prefix("only-") {
                Some(kind) => Ok(Self::ExclusiveTo(kind.parse()?)),
                None => other
                    .parse()
                    .map(Self::VaccinatedWith)
                    .map_err(|_| CohortParseError::Unknown(s.to_string())),
            },
        }
    }
}
