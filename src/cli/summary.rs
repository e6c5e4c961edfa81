use std::fmt::Write as _;

use clap::Parser;
use tracing::instrument;
use vaxreg::{Config, ReportFormatter, Registry};

use super::{
    Source,
    terminal::{Tone, fits_samples, heading},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show population statistics and cohort samples")]
pub struct Summary {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Members listed per cohort (defaults to the configured sample limit)
    #[arg(long, value_name = "N")]
    sample: Option<usize>,

    /// Only print counts, one `name=count` pair per line
    #[arg(long, conflicts_with = "sample")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Summary {
    #[instrument(level = "debug", skip(self, source))]
    pub fn run(self, source: &Source) -> anyhow::Result<()> {
        let registry = source.registry()?;
        print!("{}", self.render(&registry, source.config(), fits_samples())?);
        Ok(())
    }

    /// Renders the summary; member samples are listed only when `samples`.
    fn render(
        &self,
        registry: &Registry,
        config: &Config,
        samples: bool,
    ) -> anyhow::Result<String> {
        let formatter = ReportFormatter::new(registry, config);
        let summary = formatter.summarize();
        let mut out = String::new();

        if summary.total == 0 {
            writeln!(out, "No citizens registered. Nothing to report.")?;
            return Ok(out);
        }

        match self.output {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            }
            OutputFormat::Table if self.quiet => {
                writeln!(out, "total={}", summary.total)?;
                for figure in &summary.cohorts {
                    writeln!(out, "{}={}", figure.name, figure.count)?;
                }
            }
            OutputFormat::Table => {
                let limit = self.sample.unwrap_or_else(|| config.sample_limit());
                let engine = registry.cohorts();

                writeln!(out, "{}", heading("Vaccination statistics"))?;
                writeln!(out, "Total citizens: {}", summary.total)?;
                for entry in &summary.vaccinated {
                    writeln!(out, "Vaccinated with {}: {}", entry.vaccine, entry.count)?;
                }
                writeln!(out)?;

                writeln!(out, "{}", heading("Cohorts"))?;
                for (position, figure) in summary.cohorts.iter().enumerate() {
                    let line = format!("{}. {}: {figure}", position + 1, figure.label);
                    writeln!(out, "{}", Tone::of_cohort(figure.kind).paint(line))?;
                    if samples {
                        let cohort = engine.cohort(figure.kind);
                        write!(out, "{}", formatter.list_sample(&cohort, limit))?;
                    }
                    writeln!(out)?;
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::NaiveDate;
    use vaxreg::{Citizen, CitizenId, DoseEvent, VaccineKind};

    use super::*;

    fn registry(citizens: u64) -> Registry {
        let mut registry = Registry::default();
        for id in 1..=citizens {
            registry
                .register(Citizen::new(id, format!("Citizen {id}"), format!("17{id:08}")))
                .unwrap();
        }
        if citizens > 0 {
            for _ in 0..2 {
                registry
                    .record_dose(DoseEvent::new(
                        CitizenId::new(1),
                        VaccineKind::Pfizer,
                        NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
                        NonZeroU32::MIN,
                    ))
                    .unwrap();
            }
        }
        registry
    }

    fn render(args: &[&str], registry: &Registry, samples: bool) -> String {
        let args = std::iter::once("summary").chain(args.iter().copied());
        Summary::try_parse_from(args)
            .unwrap()
            .render(registry, &Config::default(), samples)
            .unwrap()
    }

    #[test]
    fn empty_registry_has_nothing_to_report() {
        let text = render(&[], &registry(0), true);
        assert_eq!(text, "No citizens registered. Nothing to report.\n");
    }

    #[test]
    fn quiet_prints_name_count_pairs() {
        let text = render(&["--quiet"], &registry(4), true);
        assert_eq!(
            text,
            "total=4\nunvaccinated=3\nfully-vaccinated=1\nonly-pfizer=1\nonly-astrazeneca=0\n"
        );
    }

    #[test]
    fn table_lists_samples_up_to_the_limit() {
        let text = render(&["--sample", "2"], &registry(5), true);

        assert!(text.starts_with("Vaccination statistics\n"));
        assert!(text.contains("Total citizens: 5\n"));
        assert!(text.contains("Vaccinated with Pfizer: 1\n"));
        assert!(text.contains("1. Unvaccinated: 4 (80.0%)"));
        assert!(text.contains("   - ID: 2, Name: Citizen 2, National ID: 1700000002\n"));
        assert!(text.contains("   ... and 2 more\n"));
        assert!(!text.contains("ID: 4, Name"));
    }

    #[test]
    fn table_without_samples_lists_no_members() {
        let text = render(&[], &registry(3), false);
        assert!(text.contains("2. Fully vaccinated: 1 (33.3%)"));
        assert!(!text.contains("ID: 1, Name"));
    }

    #[test]
    fn json_output_is_the_serialized_summary() {
        let text = render(&["--output", "json"], &registry(3), true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["cohorts"][0]["name"], "unvaccinated");
        assert_eq!(value["cohorts"][0]["percentage"], 66.7);
    }
}
