use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The vaccine brands tracked by the registry.
///
/// This is a closed set. Cohort logic iterates over [`VaccineKind::ALL`]
/// rather than naming variants, so adding a brand only requires extending
/// the enum and the `ALL` table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum VaccineKind {
    /// Pfizer-BioNTech.
    Pfizer,
    /// Oxford-AstraZeneca.
    AstraZeneca,
}

impl VaccineKind {
    /// Every vaccine kind, in display order.
    pub const ALL: [Self; 2] = [Self::Pfizer, Self::AstraZeneca];

    /// Human readable brand name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pfizer => "Pfizer",
            Self::AstraZeneca => "AstraZeneca",
        }
    }

    /// Iterates over every kind except `self`.
    pub fn others(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |kind| *kind != self)
    }
}

impl fmt::Display for VaccineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The given string does not name a known vaccine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown vaccine kind '{0}' (expected one of: pfizer, astrazeneca)")]
pub struct UnknownVaccineKind(pub String);

impl FromStr for VaccineKind {
    type Err = UnknownVaccineKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVaccineKind(s.to_string()))
    }
}
