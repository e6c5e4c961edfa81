use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for ingestion and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Title printed at the top of exported reports.
    report_title: String,

    /// Number of members listed per cohort on the console before the rest
    /// are summarised as a remainder count.
    sample_limit: usize,

    /// Where `export` writes the report unless a path is given.
    export_path: PathBuf,

    /// Whether ingestion stops at the first rejected record.
    ///
    /// When `true` (default): a duplicate citizen id or a dose for an unknown
    /// citizen aborts loading the feed.
    ///
    /// When `false`: rejected records are logged and skipped.
    pub strict_ingest: bool,

    /// Seed for the synthetic feed used when no feed file is given.
    ///
    /// If unset, a fresh seed is drawn for every run.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_title: default_report_title(),
            sample_limit: default_sample_limit(),
            export_path: default_export_path(),
            strict_ingest: true,
            seed: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The report title.
    #[must_use]
    pub fn report_title(&self) -> &str {
        &self.report_title
    }

    /// Sets the report title.
    pub fn set_report_title(&mut self, title: impl Into<String>) {
        self.report_title = title.into();
    }

    /// How many members to list per cohort on the console.
    #[must_use]
    pub const fn sample_limit(&self) -> usize {
        self.sample_limit
    }

    /// Sets the console sample size.
    pub const fn set_sample_limit(&mut self, limit: usize) {
        self.sample_limit = limit;
    }

    /// The default export destination.
    #[must_use]
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }
}

fn default_report_title() -> String {
    "COVID-19 VACCINATION REPORT".to_string()
}

const fn default_sample_limit() -> usize {
    10
}

fn default_export_path() -> PathBuf {
    PathBuf::from("vaccination_report.txt")
}

const fn default_strict_ingest() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_report_title")]
        report_title: String,

        #[serde(default = "default_sample_limit")]
        sample_limit: usize,

        #[serde(default = "default_export_path")]
        export_path: PathBuf,

        #[serde(default = "default_strict_ingest")]
        strict_ingest: bool,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                report_title,
                sample_limit,
                export_path,
                strict_ingest,
                seed,
            } => Self {
                report_title,
                sample_limit,
                export_path,
                strict_ingest,
                seed,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            report_title: config.report_title,
            sample_limit: config.sample_limit,
            export_path: config.export_path,
            strict_ingest: config.strict_ingest,
            seed: config.seed,
        }
    }
}
