use std::path::PathBuf;

use clap::Parser;
use tracing::instrument;
use vaxreg::storage::{SyntheticParams, synthetic};

use super::terminal::Tone;

#[derive(Debug, Parser)]
#[command(about = "Write a synthetic feed file")]
pub struct Generate {
    /// Destination feed file (.yaml, .yml or .json)
    #[arg(long, short)]
    output: PathBuf,

    /// Number of citizens
    #[arg(long, default_value_t = 500)]
    citizens: u64,

    /// Citizens vaccinated with each vaccine kind
    #[arg(long, default_value_t = 75)]
    per_kind: usize,

    /// Seed for the random generator (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Generate {
    #[instrument(level = "debug")]
    pub fn run(self) -> anyhow::Result<()> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let params = SyntheticParams {
            citizens: self.citizens,
            per_kind: self.per_kind,
            reference_date: chrono::Local::now().date_naive(),
        };

        let feed = synthetic::generate(&params, seed);
        feed.save(&self.output)?;

        let message = format!(
            "✅ Wrote {} citizens and {} doses to {} (seed {seed})",
            feed.citizens.len(),
            feed.doses.len(),
            self.output.display()
        );
        println!("{}", Tone::Success.paint(message));
        Ok(())
    }
}
