//! Console styling for registry output.
//!
//! Every coloured line goes through [`Tone::paint`], which falls back to
//! plain text when stdout cannot show colour.

use owo_colors::{OwoColorize, colors::css};
use vaxreg::CohortKind;

/// Narrowest terminal that still gets member samples under each cohort.
const SAMPLE_MIN_WIDTH: u16 = 60;

/// What a line of console output is telling the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something was written or completed.
    Success,
    /// Records were skipped, or a cohort needs attention.
    Warning,
    /// Headline figures.
    Info,
    /// Rules and empty-result notes.
    Muted,
}

impl Tone {
    /// The tone a cohort's summary line is shown in.
    pub const fn of_cohort(kind: CohortKind) -> Self {
        match kind {
            CohortKind::Unvaccinated => Self::Warning,
            CohortKind::FullyVaccinated => Self::Success,
            CohortKind::VaccinatedWith(_) | CohortKind::ExclusiveTo(_) => Self::Info,
        }
    }

    /// Styles `text`, or returns it unchanged when colour is unavailable.
    pub fn paint(self, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if !color_enabled() {
            return text.to_string();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().to_string(),
            Self::Info => text.fg::<css::LightBlue>().to_string(),
            Self::Muted => text.dimmed().to_string(),
        }
    }
}

fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether member samples fit beside cohort headings.
///
/// Output that is not a terminal has no width and always gets samples.
pub fn fits_samples() -> bool {
    terminal_size::terminal_size().is_none_or(|(width, _)| width.0 >= SAMPLE_MIN_WIDTH)
}

/// A section heading: the title over a muted rule of the same width.
pub fn heading(title: &str) -> String {
    let rule = "─".repeat(title.chars().count());
    format!("{title}\n{}", Tone::Muted.paint(rule))
}
