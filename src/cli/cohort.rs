use std::fmt::Write as _;

use clap::Parser;
use tracing::instrument;
use vaxreg::{CohortKind, Config, ReportFormatter, Registry, report::percentage};

use super::{Source, terminal::Tone};

/// Command arguments for `vax cohort`.
#[derive(Debug, Parser)]
#[command(about = "List the members of one cohort")]
pub struct Cohort {
    /// The cohort to list (e.g. unvaccinated, fully-vaccinated, pfizer,
    /// only-astrazeneca).
    cohort: CohortKind,

    /// Maximum number of members to list (default: all).
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Print member ids only, one per line, without headers.
    #[arg(long, short)]
    quiet: bool,
}

impl Cohort {
    #[instrument(level = "debug", skip(source))]
    pub fn run(self, source: &Source) -> anyhow::Result<()> {
        let registry = source.registry()?;
        print!("{}", self.render(&registry, source.config())?);
        Ok(())
    }

    fn render(&self, registry: &Registry, config: &Config) -> anyhow::Result<String> {
        let cohort = registry.cohorts().cohort(self.cohort);
        let limit = self.limit.unwrap_or(cohort.len());
        let mut out = String::new();

        if self.quiet {
            for id in cohort.iter().take(limit) {
                writeln!(out, "{id}")?;
            }
            return Ok(out);
        }

        let total = registry.citizens().len();
        let header = format!(
            "{}: {} of {total} ({:.1}%)",
            self.cohort.label(),
            cohort.len(),
            percentage(cohort.len(), total)
        );
        writeln!(out, "{}", Tone::Info.paint(header))?;

        if cohort.is_empty() {
            writeln!(out, "{}", Tone::Muted.paint("No citizens in this cohort."))?;
            return Ok(out);
        }

        let formatter = ReportFormatter::new(registry, config);
        write!(out, "{}", formatter.list_sample(&cohort, limit))?;
        Ok(out)
    }
}
