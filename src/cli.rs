use std::path::{Path, PathBuf};

mod cohort;
mod export;
mod generate;
mod summary;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use cohort::Cohort;
use export::Export;
use generate::Generate;
use summary::Summary;
use terminal::Tone;
use tracing::{debug, instrument};
use vaxreg::{
    Config, Feed, Registry,
    storage::{SyntheticParams, synthetic},
};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Feed file of citizens and doses (.yaml, .yml or .json).
    ///
    /// When omitted, a synthetic population is generated.
    #[arg(short, long, global = true)]
    feed: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "vax.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.config)?;
        let source = Source {
            feed: self.feed,
            config,
        };

        self.command
            .unwrap_or_else(|| Command::Summary(Summary::default()))
            .run(&source)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show population statistics and cohort samples (default)
    Summary(Summary),

    /// List the members of one cohort
    ///
    /// Cohorts are 'unvaccinated', 'fully-vaccinated', a vaccine name such as
    /// 'pfizer', or 'only-<vaccine>' for citizens who received no other brand.
    Cohort(Cohort),

    /// Write the full report to a text file
    Export(Export),

    /// Write a synthetic feed file
    Generate(Generate),
}

impl Command {
    fn run(self, source: &Source) -> anyhow::Result<()> {
        match self {
            Self::Summary(command) => command.run(source)?,
            Self::Cohort(command) => command.run(source)?,
            Self::Export(command) => command.run(source)?,
            Self::Generate(command) => command.run()?,
        }
        Ok(())
    }
}

/// Where the registry comes from, plus the settings that shape reports.
#[derive(Debug)]
pub struct Source {
    feed: Option<PathBuf>,
    config: Config,
}

impl Source {
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the registry from the feed file, or from a synthetic feed.
    #[instrument(level = "debug", skip(self))]
    pub fn registry(&self) -> anyhow::Result<Registry> {
        let feed = match &self.feed {
            Some(path) => Feed::load(path)
                .with_context(|| format!("failed to load feed {}", path.display()))?,
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                debug!(seed, "no feed given, generating synthetic population");
                let params = SyntheticParams::new(chrono::Local::now().date_naive());
                synthetic::generate(&params, seed)
            }
        };

        let ingested = feed
            .ingest(self.config.strict_ingest)
            .context("feed rejected (set strict_ingest = false to skip bad records)")?;

        if let Some(summary) = ingested.rejection_summary() {
            eprintln!("{}", Tone::Warning.paint(format!("⚠️  {summary}")));
        }

        Ok(ingested.registry)
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))
    } else {
        debug!("no config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}
