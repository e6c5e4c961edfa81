//! Textual summaries of cohorts.
//!
//! The [`ReportFormatter`] turns the cohorts derived from a [`Registry`] into
//! summary figures, console samples, and the sections of the exported report.
//! It produces plain data and [`fmt::Display`] adapters only; where the text
//! ends up is the caller's concern.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Serialize, Serializer};

use crate::domain::{Citizen, CitizenStore, Cohort, CohortKind, Config, Registry, VaccineKind};

/// Width of the rule under the report heading.
const HEADING_RULE_WIDTH: usize = 32;

/// Extra dashes added to a section title's length for its rule.
const SECTION_RULE_PADDING: usize = 20;

/// Share of `total` represented by `count`, as a percentage.
///
/// An empty population has no meaningful share; this returns `0.0` rather
/// than dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Rounds a percentage to the one decimal place reports show.
#[must_use]
fn round_percentage(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_percentage<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_percentage(*value))
}

/// Headline figures for a registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of registered citizens.
    pub total: usize,
    /// Citizens with at least one dose, per vaccine kind.
    pub vaccinated: Vec<KindCount>,
    /// The standard cohorts, in report order.
    pub cohorts: Vec<CohortFigure>,
}

impl Summary {
    /// The figure for a given cohort, if it is part of the summary.
    #[must_use]
    pub fn figure(&self, kind: CohortKind) -> Option<&CohortFigure> {
        self.cohorts.iter().find(|figure| figure.kind == kind)
    }
}

/// Citizens vaccinated with one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    /// The vaccine kind.
    pub vaccine: VaccineKind,
    /// Number of citizens with at least one dose of it.
    pub count: usize,
}

/// Size of one cohort relative to the population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortFigure {
    /// The cohort.
    #[serde(skip)]
    pub kind: CohortKind,
    /// Machine-readable cohort name.
    pub name: String,
    /// Human-readable cohort label.
    pub label: String,
    /// Number of members.
    pub count: usize,
    /// Members as a percentage of the population.
    ///
    /// Kept at full precision; displayed and serialized to one decimal.
    #[serde(serialize_with = "serialize_percentage")]
    pub percentage: f64,
}

impl fmt::Display for CohortFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.count, self.percentage)
    }
}

/// The first few members of a cohort.
#[derive(Debug, Clone)]
pub struct Sample<'a> {
    /// Listed members.
    pub members: Vec<&'a Citizen>,
    /// Members not listed.
    pub remainder: usize,
}

impl fmt::Display for Sample<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for citizen in &self.members {
            writeln!(f, "   - {citizen}")?;
        }
        if self.remainder > 0 {
            writeln!(f, "   ... and {} more", self.remainder)?;
        }
        Ok(())
    }
}

/// Export sections for a list of named cohorts.
///
/// Each section has a header with the cohort title and size, a dashed rule,
/// one line per member and a trailing blank line.
#[derive(Debug, Clone, Copy)]
pub struct Sections<'a> {
    citizens: &'a CitizenStore,
    cohorts: &'a [(CohortKind, Cohort)],
}

impl fmt::Display for Sections<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, cohort) in self.cohorts {
            let title = kind.title();
            writeln!(f, "{title} ({} records):", cohort.len())?;
            writeln!(f, "{}", "-".repeat(title.len() + SECTION_RULE_PADDING))?;
            for citizen in members(self.citizens, cohort) {
                writeln!(f, "{citizen}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The complete export document.
#[derive(Debug, Clone)]
pub struct ExportDocument<'a> {
    title: &'a str,
    generated: NaiveDateTime,
    summary: Summary,
    citizens: &'a CitizenStore,
    cohorts: Vec<(CohortKind, Cohort)>,
}

impl fmt::Display for ExportDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Generated: {}", self.generated.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "{}", "=".repeat(HEADING_RULE_WIDTH))?;
        writeln!(f)?;

        writeln!(f, "Executive summary:")?;
        writeln!(f, "- Total citizens: {}", self.summary.total)?;
        for figure in &self.summary.cohorts {
            match figure.kind {
                CohortKind::ExclusiveTo(_) | CohortKind::VaccinatedWith(_) => {
                    writeln!(f, "- {}: {}", figure.label, figure.count)?;
                }
                CohortKind::Unvaccinated | CohortKind::FullyVaccinated => {
                    writeln!(f, "- {}: {figure}", figure.label)?;
                }
            }
        }
        writeln!(f)?;

        let sections = Sections {
            citizens: self.citizens,
            cohorts: &self.cohorts,
        };
        write!(f, "{sections}")
    }
}

/// Builds summaries and report text from a registry.
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter<'a> {
    registry: &'a Registry,
    config: &'a Config,
}

impl<'a> ReportFormatter<'a> {
    /// Creates a formatter over a registry.
    #[must_use]
    pub const fn new(registry: &'a Registry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    /// Computes the headline figures.
    #[must_use]
    pub fn summarize(&self) -> Summary {
        let engine = self.registry.cohorts();
        let total = self.registry.citizens().len();

        let vaccinated = VaccineKind::ALL
            .into_iter()
            .map(|vaccine| KindCount {
                vaccine,
                count: engine.vaccinated_with(vaccine).len(),
            })
            .collect();

        let cohorts = CohortKind::standard()
            .into_iter()
            .map(|kind| {
                let count = engine.cohort(kind).len();
                CohortFigure {
                    kind,
                    name: kind.to_string(),
                    label: kind.label(),
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect();

        Summary {
            total,
            vaccinated,
            cohorts,
        }
    }

    /// Lists up to `limit` members of a cohort.
    ///
    /// Members are taken in ascending id order; the remainder counts the
    /// members that were left out.
    #[must_use]
    pub fn list_sample(&self, cohort: &Cohort, limit: usize) -> Sample<'a> {
        let members: Vec<&Citizen> = members(self.registry.citizens(), cohort)
            .take(limit)
            .collect();
        let remainder = cohort.len().saturating_sub(members.len());
        Sample { members, remainder }
    }

    /// Renders one section per cohort.
    #[must_use]
    pub fn export_sections<'c>(&self, cohorts: &'c [(CohortKind, Cohort)]) -> Sections<'c>
    where
        'a: 'c,
    {
        Sections {
            citizens: self.registry.citizens(),
            cohorts,
        }
    }

    /// Renders the complete export document, stamped with `generated` in
    /// its own time zone.
    #[must_use]
    pub fn render_export<Tz: TimeZone>(&self, generated: &DateTime<Tz>) -> ExportDocument<'a> {
        let engine = self.registry.cohorts();
        ExportDocument {
            title: self.config.report_title(),
            generated: generated.naive_local(),
            summary: self.summarize(),
            citizens: self.registry.citizens(),
            cohorts: CohortKind::standard()
                .into_iter()
                .map(|kind| (kind, engine.cohort(kind)))
                .collect(),
        }
    }
}

fn members<'a, 'c>(
    citizens: &'a CitizenStore,
    cohort: &'c Cohort,
) -> impl Iterator<Item = &'a Citizen> + use<'a, 'c> {
    cohort.iter().filter_map(move |id| citizens.get(id).ok())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::{CitizenId, DoseEvent};

    fn registry(ids: &[u64], doses: &[(u64, VaccineKind)]) -> Registry {
        let mut registry = Registry::default();
        for &id in ids {
            registry
                .register(Citizen::new(id, format!("Citizen {id}"), format!("17{id:08}")))
                .unwrap();
        }
        for (n, &(id, vaccine)) in doses.iter().enumerate() {
            registry
                .record_dose(DoseEvent::new(
                    CitizenId::new(id),
                    vaccine,
                    NaiveDate::from_ymd_opt(2021, 2, 1).unwrap() + chrono::Days::new(n as u64),
                    NonZeroU32::MIN,
                ))
                .unwrap();
        }
        registry
    }

    fn mixed_registry() -> Registry {
        registry(
            &[1, 2, 3],
            &[
                (1, VaccineKind::Pfizer),
                (1, VaccineKind::Pfizer),
                (2, VaccineKind::Pfizer),
                (2, VaccineKind::AstraZeneca),
            ],
        )
    }

    #[test]
    fn zero_population_reports_zero_percent() {
        assert!((percentage(0, 0) - 0.0).abs() < f64::EPSILON);

        let registry = Registry::default();
        let config = Config::default();
        let summary = ReportFormatter::new(&registry, &config).summarize();

        assert_eq!(summary.total, 0);
        for figure in &summary.cohorts {
            assert_eq!(figure.count, 0);
            assert!(figure.percentage.is_finite());
            assert_eq!(format!("{:.1}", figure.percentage), "0.0");
        }
    }

    #[test]
    fn unvaccinated_population_summary() {
        let registry = registry(&[1, 2, 3], &[]);
        let config = Config::default();
        let summary = ReportFormatter::new(&registry, &config).summarize();

        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.figure(CohortKind::Unvaccinated).unwrap().to_string(),
            "3 (100.0%)"
        );
        assert_eq!(
            summary.figure(CohortKind::FullyVaccinated).unwrap().to_string(),
            "0 (0.0%)"
        );
        assert!(summary.vaccinated.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn summary_counts_mixed_population() {
        let registry = mixed_registry();
        let config = Config::default();
        let summary = ReportFormatter::new(&registry, &config).summarize();

        assert_eq!(
            summary.vaccinated,
            vec![
                KindCount {
                    vaccine: VaccineKind::Pfizer,
                    count: 2
                },
                KindCount {
                    vaccine: VaccineKind::AstraZeneca,
                    count: 1
                },
            ]
        );
        assert_eq!(
            summary.figure(CohortKind::FullyVaccinated).unwrap().to_string(),
            "1 (33.3%)"
        );
        assert_eq!(
            summary
                .figure(CohortKind::ExclusiveTo(VaccineKind::AstraZeneca))
                .unwrap()
                .count,
            0
        );
    }

    #[test]
    fn json_summary_rounds_percentages_to_one_decimal() {
        let registry = registry(
            &[1, 2, 3],
            &[(1, VaccineKind::Pfizer), (1, VaccineKind::Pfizer)],
        );
        let config = Config::default();
        let summary = ReportFormatter::new(&registry, &config).summarize();

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""name":"unvaccinated","label":"Unvaccinated","count":2,"percentage":66.7"#));
        assert!(json.contains(r#""name":"fully-vaccinated","label":"Fully vaccinated","count":1,"percentage":33.3"#));
        assert!(!json.contains("33.33"));
        assert!(!json.contains("66.66"));
    }

    #[test]
    fn sample_is_truncated_with_remainder() {
        let ids: Vec<u64> = (1..=12).collect();
        let registry = registry(&ids, &[]);
        let config = Config::default();
        let formatter = ReportFormatter::new(&registry, &config);

        let cohort = registry.cohorts().unvaccinated();
        let sample = formatter.list_sample(&cohort, 10);

        assert_eq!(sample.members.len(), 10);
        assert_eq!(sample.remainder, 2);
        let rendered = sample.to_string();
        assert!(rendered.starts_with("   - ID: 1, Name: Citizen 1"));
        assert!(rendered.ends_with("   ... and 2 more\n"));
    }

    #[test]
    fn sample_without_truncation_has_no_remainder_line() {
        let registry = registry(&[1, 2], &[]);
        let config = Config::default();
        let formatter = ReportFormatter::new(&registry, &config);

        let sample = formatter.list_sample(&registry.cohorts().unvaccinated(), 10);
        assert_eq!(sample.remainder, 0);
        assert!(!sample.to_string().contains("more"));
    }

    #[test]
    fn export_sections_have_header_rule_members_and_blank_line() {
        let registry = mixed_registry();
        let config = Config::default();
        let formatter = ReportFormatter::new(&registry, &config);

        let cohorts = vec![(CohortKind::Unvaccinated, registry.cohorts().unvaccinated())];
        let text = formatter.export_sections(&cohorts).to_string();

        let title = "UNVACCINATED CITIZENS";
        let expected = format!(
            "{title} (1 records):\n{}\nID: 3, Name: Citizen 3, National ID: 1700000003\n\n",
            "-".repeat(title.len() + 20)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn export_document_layout() {
        let registry = mixed_registry();
        let config = Config::default();
        let formatter = ReportFormatter::new(&registry, &config);

        let generated = Utc.with_ymd_and_hms(2021, 7, 1, 12, 30, 0).unwrap();
        let text = formatter.render_export(&generated).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "COVID-19 VACCINATION REPORT");
        assert_eq!(lines[1], "Generated: 2021-07-01 12:30:00");
        assert_eq!(lines[2], "=".repeat(32));
        assert_eq!(lines[3], "");
        assert_eq!(
            &lines[4..10],
            &[
                "Executive summary:",
                "- Total citizens: 3",
                "- Unvaccinated: 1 (33.3%)",
                "- Fully vaccinated: 1 (33.3%)",
                "- Exclusive Pfizer: 1",
                "- Exclusive AstraZeneca: 0",
            ]
        );
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "UNVACCINATED CITIZENS (1 records):");
        assert!(text.contains("CITIZENS ONLY VACCINATED WITH ASTRAZENECA (0 records):\n"));
        assert!(text.ends_with("\n\n"));
    }
}
