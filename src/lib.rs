//! Citizen vaccination registry
//!
//! A registry of citizens and the doses they received, with a cohort engine
//! that partitions the population by vaccination status and a formatter that
//! turns cohorts into summaries and exported reports.

pub mod domain;
pub use domain::{
    Citizen, CitizenId, CitizenStore, Cohort, CohortEngine, CohortKind, Config, DoseEvent,
    DoseLedger, Registry, VaccineKind,
};

pub mod report;
pub use report::{ReportFormatter, Summary};

/// Feed files and synthetic data.
pub mod storage;
pub use storage::{Feed, Ingested};
