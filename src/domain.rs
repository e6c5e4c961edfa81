//! Domain models for the vaccination registry.
//!
//! This module contains the citizen and dose types, the two collections that
//! hold them, and the cohort engine that derives population subsets from
//! those collections.

mod citizen;
pub use citizen::{Citizen, CitizenId};

mod vaccine;
pub use vaccine::{UnknownVaccineKind, VaccineKind};

mod dose;
pub use dose::DoseEvent;

/// Identity-keyed citizen registry.
pub mod citizen_store;
pub use citizen_store::{CitizenStore, DuplicateIdentity, NotFound};

/// Append-only dose ledger.
pub mod dose_ledger;
pub use dose_ledger::{DoseLedger, UnknownCitizen};

pub mod cohort;
pub use cohort::{Cohort, CohortKind, CohortParseError};

pub mod engine;
pub use engine::CohortEngine;

mod registry;
pub use registry::Registry;

mod config;
pub use config::Config;
