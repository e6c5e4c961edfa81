use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, instrument};
use vaxreg::ReportFormatter;

use super::{Source, terminal::Tone};

#[derive(Debug, Parser)]
#[command(about = "Write the full report to a text file")]
pub struct Export {
    /// Destination file (defaults to the configured export path)
    #[arg(long, short)]
    path: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Export {
    #[instrument(level = "debug", skip(source))]
    pub fn run(self, source: &Source) -> anyhow::Result<()> {
        let path = self
            .path
            .unwrap_or_else(|| source.config().export_path().to_path_buf());

        let registry = source.registry()?;

        if !self.yes {
            let proceed = dialoguer::Confirm::new()
                .with_prompt(format!("Export the report to {}?", path.display()))
                .default(false)
                .interact()?;
            if !proceed {
                println!("Cancelled");
                return Ok(());
            }
        }

        let report = ReportFormatter::new(&registry, source.config())
            .render_export(&chrono::Local::now())
            .to_string();
        std::fs::write(&path, report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "exported report");

        println!(
            "{}",
            Tone::Success.paint(format!("✅ Report exported to {}", path.display()))
        );
        Ok(())
    }
}
