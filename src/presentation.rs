//! Display attributes per severity and per score band.

use crate::models::Severity;
use owo_colors::AnsiColors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: AnsiColors,
}

/// One row per severity. Adding a variant fails to compile until it has a row.
pub fn severity_style(sev: Severity) -> SeverityStyle {
    match sev {
        Severity::Error => SeverityStyle {
            label: "⟦error⟧",
            icon: "✖",
            color: AnsiColors::Red,
        },
        Severity::Warning => SeverityStyle {
            label: "⟦warn⟧",
            icon: "▲",
            color: AnsiColors::Yellow,
        },
        Severity::Info => SeverityStyle {
            label: "⟦info⟧",
            icon: "◆",
            color: AnsiColors::Blue,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn of(score: u8) -> ScoreBand {
        match score {
            90..=u8::MAX => ScoreBand::Good,
            70..=89 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Fair => "needs work",
            ScoreBand::Poor => "poor",
        }
    }

    pub fn color(self) -> AnsiColors {
        match self {
            ScoreBand::Good => AnsiColors::Green,
            ScoreBand::Fair => AnsiColors::Yellow,
            ScoreBand::Poor => AnsiColors::Red,
        }
    }
}
