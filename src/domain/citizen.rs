use std::fmt;

use serde::{Deserialize, Serialize};

/// Externally assigned identifier of a citizen.
///
/// This is the sole identity of a [`Citizen`]. Two records carrying the same
/// id describe the same person, whatever their other fields say.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CitizenId(u64);

impl CitizenId {
    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CitizenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered person.
///
/// Citizens are immutable once registered; the registry offers no way to edit
/// or remove them. Records do not implement `PartialEq`: two citizens are
/// the same person exactly when their [`Citizen::id`]s are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citizen {
    id: CitizenId,
    name: String,
    national_id: String,
}

impl Citizen {
    /// Creates a new citizen record.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, national_id: impl Into<String>) -> Self {
        Self {
            id: CitizenId::new(id),
            name: name.into(),
            national_id: national_id.into(),
        }
    }

    /// The identity of this citizen.
    #[must_use]
    pub const fn id(&self) -> CitizenId {
        self.id
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// National identity document number.
    #[must_use]
    pub fn national_id(&self) -> &str {
        &self.national_id
    }
}

impl fmt::Display for Citizen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, National ID: {}",
            self.id, self.name, self.national_id
        )
    }
}
