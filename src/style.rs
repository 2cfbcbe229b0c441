use std::io::IsTerminal;

use anstyle::{AnsiColor, Reset, Style};

const NOTE_COLOR: Style =
    Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::BrightBlack)));
const ALERT_COLOR: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::BrightRed)));

/// Styling for diagnostic lines. Escape codes are only emitted when stderr
/// is a terminal.
pub struct Paint {
    color: bool,
}

impl Paint {
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }

    fn apply(&self, style: Style, s: &str) -> String {
        if self.color {
            format!("{style}{s}{Reset}")
        } else {
            s.to_string()
        }
    }

    /// Dimmed status output, for timing and progress lines.
    #[must_use]
    pub fn note(&self, s: &str) -> String {
        self.apply(NOTE_COLOR, s)
    }

    /// Highlighted output for reported problems.
    #[must_use]
    pub fn alert(&self, s: &str) -> String {
        self.apply(ALERT_COLOR, s)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new()
    }
}
