//! File-backed ingestion feed.
//!
//! A [`Feed`] is a snapshot of citizens and dose events as they arrive from
//! outside the registry. It is loaded from YAML or JSON and then ingested
//! into a [`Registry`], which enforces identity and reference rules.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::domain::{Citizen, DoseEvent, DuplicateIdentity, Registry, UnknownCitizen};

/// Citizens and doses to be loaded into a registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    /// Citizens, ids expected to be unique.
    #[serde(default)]
    pub citizens: Vec<Citizen>,
    /// Dose events, each referring to one of `citizens`.
    #[serde(default)]
    pub doses: Vec<DoseEvent>,
}

/// Serialization formats a feed file can use, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl FeedFormat {
    /// Picks the format for a path from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Errors that can occur when reading or writing a feed file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file extension is not a known feed format.
    #[error("unsupported feed format for {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// An I/O error occurred.
    #[error("failed to access feed file: {0}")]
    Io(#[from] io::Error),
    /// The YAML content could not be (de)serialized.
    #[error("invalid YAML feed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON content could not be (de)serialized.
    #[error("invalid JSON feed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A record rejected while ingesting a feed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IngestError {
    /// A citizen id appeared more than once.
    #[error(transparent)]
    DuplicateIdentity(#[from] DuplicateIdentity),
    /// A dose referred to a citizen missing from the feed.
    #[error(transparent)]
    UnknownCitizen(#[from] UnknownCitizen),
}

/// A registry built from a feed, with any records that were skipped.
#[derive(Debug)]
pub struct Ingested {
    /// The populated registry.
    pub registry: Registry,
    /// Records rejected in lenient mode, in feed order.
    pub rejected: Vec<IngestError>,
}

impl Ingested {
    /// Summarises the rejected records, if there were any.
    #[must_use]
    pub fn rejection_summary(&self) -> Option<RejectionSummary<'_>> {
        (!self.rejected.is_empty()).then_some(RejectionSummary(&self.rejected))
    }
}

/// Display adapter listing rejected records.
#[derive(Debug)]
pub struct RejectionSummary<'a>(&'a [IngestError]);

impl fmt::Display for RejectionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        let total = self.0.len();
        write!(f, "skipped {total} record(s): ")?;

        let displayed: Vec<String> = self
            .0
            .iter()
            .take(MAX_DISPLAY)
            .map(ToString::to_string)
            .collect();
        let msg = displayed.join("; ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

impl Feed {
    /// Reads a feed file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not supported, the file cannot be
    /// read, or its content does not describe a feed.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let format = FeedFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parses feed content in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content does not describe a feed.
    pub fn parse(content: &str, format: FeedFormat) -> Result<Self, LoadError> {
        let feed = match format {
            FeedFormat::Yaml => serde_yaml::from_str(content)?,
            FeedFormat::Json => serde_json::from_str(content)?,
        };
        Ok(feed)
    }

    /// Writes the feed to a file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is not supported, serialization
    /// fails, or the file cannot be written.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let content = match FeedFormat::from_path(path)? {
            FeedFormat::Yaml => serde_yaml::to_string(self)?,
            FeedFormat::Json => serde_json::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the feed into a new registry.
    ///
    /// Citizens are registered first, then doses are recorded, so a dose may
    /// appear before its citizen in the feed.
    ///
    /// # Errors
    ///
    /// In strict mode the first rejected record is returned as an error. In
    /// lenient mode rejected records are logged, skipped, and reported in
    /// [`Ingested::rejected`]; this never fails.
    #[instrument(level = "debug", skip(self), fields(citizens = self.citizens.len(), doses = self.doses.len()))]
    pub fn ingest(self, strict: bool) -> Result<Ingested, IngestError> {
        let mut registry = Registry::with_capacity(self.citizens.len(), self.doses.len());
        let mut rejected = Vec::new();

        for citizen in self.citizens {
            if let Err(e) = registry.register(citizen).map_err(IngestError::from) {
                if strict {
                    return Err(e);
                }
                warn!("{e}");
                rejected.push(e);
            }
        }

        for dose in self.doses {
            if let Err(e) = registry.record_dose(dose).map_err(IngestError::from) {
                if strict {
                    return Err(e);
                }
                warn!("{e}");
                rejected.push(e);
            }
        }

        info!(
            citizens = registry.citizens().len(),
            doses = registry.doses().len(),
            rejected = rejected.len(),
            "ingested feed"
        );

        Ok(Ingested { registry, rejected })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::domain::{CitizenId, VaccineKind};

    const YAML_FEED: &str = "\
citizens:
  - id: 1
    name: Ada
    national_id: '1700000001'
  - id: 2
    name: Grace
    national_id: '1700000002'
doses:
  - citizen_id: 1
    vaccine: Pfizer
    date: 2021-03-01
    dose_number: 1
  - citizen_id: 1
    vaccine: Pfizer
    date: 2021-04-01
    dose_number: 2
";

    #[test]
    fn parses_yaml_feed() {
        let feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        assert_eq!(feed.citizens.len(), 2);
        assert_eq!(feed.doses.len(), 2);
        assert_eq!(feed.doses[1].vaccine, VaccineKind::Pfizer);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            FeedFormat::from_path(Path::new("feed.YML")).unwrap(),
            FeedFormat::Yaml
        );
        assert_eq!(
            FeedFormat::from_path(Path::new("feed.json")).unwrap(),
            FeedFormat::Json
        );
        assert!(matches!(
            FeedFormat::from_path(Path::new("feed.csv")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn save_and_load_json_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("feed.json");

        let feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        feed.save(&path).unwrap();

        let loaded = Feed::load(&path).unwrap();
        assert_eq!(
            serde_json::to_value(&loaded).unwrap(),
            serde_json::to_value(&feed).unwrap()
        );
        assert_eq!(loaded.doses, feed.doses);
    }

    #[test]
    fn strict_ingest_stops_at_duplicate_identity() {
        let mut feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        feed.citizens.push(Citizen::new(2, "Impostor", "1799999999"));

        let err = feed.ingest(true).unwrap_err();
        assert_eq!(
            err,
            IngestError::DuplicateIdentity(DuplicateIdentity(CitizenId::new(2)))
        );
    }

    #[test]
    fn strict_ingest_stops_at_unknown_citizen() {
        let mut feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        feed.doses[0].citizen_id = CitizenId::new(9);

        let err = feed.ingest(true).unwrap_err();
        assert_eq!(err, IngestError::UnknownCitizen(UnknownCitizen(CitizenId::new(9))));
    }

    #[test]
    fn lenient_ingest_skips_and_reports_rejections() {
        let mut feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        feed.citizens.push(Citizen::new(1, "Impostor", "1799999999"));
        feed.doses[0].citizen_id = CitizenId::new(9);

        let ingested = feed.ingest(false).unwrap();

        assert_eq!(ingested.registry.citizens().len(), 2);
        assert_eq!(ingested.registry.doses().len(), 1);
        assert_eq!(
            ingested
                .registry
                .citizens()
                .get(CitizenId::new(1))
                .unwrap()
                .name(),
            "Ada"
        );
        assert_eq!(ingested.rejected.len(), 2);

        let summary = ingested.rejection_summary().unwrap().to_string();
        assert!(summary.starts_with("skipped 2 record(s): "));
        assert!(summary.contains("citizen 1 is already registered"));
    }

    #[test]
    fn clean_ingest_has_no_rejection_summary() {
        let feed = Feed::parse(YAML_FEED, FeedFormat::Yaml).unwrap();
        let ingested = feed.ingest(true).unwrap();

        assert!(ingested.rejection_summary().is_none());
        assert_eq!(
            ingested
                .registry
                .cohorts()
                .fully_vaccinated()
                .iter()
                .collect::<Vec<_>>(),
            vec![CitizenId::new(1)]
        );
    }
}
