//! Visual styling utilities for the CLI.
//!
//! This module provides consistent styling across all CLI output including:
//! - Spinners for requests in flight
//! - Comfort thresholds and colored values
//! - Table formatting

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::cli::StyleMode;

// ============================================================================
// Progress Indicators
// ============================================================================

/// Standard spinner tick characters (Braille dots animation)
const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Standard spinner tick interval
const SPINNER_TICK_MS: u64 = 80;

/// Get the standard spinner style.
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICK_CHARS)
}

/// Create a spinner shown while a request is in flight.
pub fn fetching_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

/// Spinner that is only drawn when `quiet` is off and stderr is a terminal.
pub fn maybe_spinner(quiet: bool, message: &str) -> Option<ProgressBar> {
    (!quiet && io::stderr().is_terminal()).then(|| fetching_spinner(message))
}

// ============================================================================
// Color Thresholds
// ============================================================================

/// Humidity thresholds (percentage) for comfort.
pub mod humidity {
    pub const LOW: f64 = 30.0; // Yellow: < 30% (too dry)
    pub const HIGH: f64 = 70.0; // Yellow: > 70% (too humid)
    // Green: 30-70%
}

/// Temperature thresholds (Celsius) for comfort.
pub mod temperature {
    pub const COLD: f64 = 18.0; // Cyan: < 18°C
    pub const WARM: f64 = 26.0; // Orange: > 26°C
    // Green: 18-26°C
}

// ============================================================================
// Colored Value Formatting
// ============================================================================

/// Format humidity percentage with appropriate color.
pub fn format_humidity_colored(percent: f64, no_color: bool) -> String {
    let formatted = format!("{:.1}%", percent);
    if no_color {
        return formatted;
    }

    if !(humidity::LOW..=humidity::HIGH).contains(&percent) {
        format!("{}", formatted.yellow())
    } else {
        format!("{}", formatted.green())
    }
}

/// Format a temperature with a color picked from its Celsius value.
/// `display` is the already converted value shown to the user.
pub fn format_temp_colored(celsius: f64, display: f64, no_color: bool) -> String {
    let formatted = format!("{:.1}", display);
    if no_color {
        return formatted;
    }

    if celsius < temperature::COLD {
        format!("{}", formatted.cyan())
    } else if celsius > temperature::WARM {
        // Orange color (RGB: 255, 165, 0)
        format!("{}", formatted.truecolor(255, 165, 0))
    } else {
        format!("{}", formatted.green())
    }
}

// ============================================================================
// Messages and Headers
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format an info message.
pub fn format_info(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[--] {}", message)
    } else {
        format!("{} {}", "[--]".cyan(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

/// Format a title header. The rule under it never exceeds the terminal width.
pub fn format_title(title: &str, no_color: bool) -> String {
    let rule = "━".repeat(title.chars().count().min(terminal_width()));
    if no_color {
        format!("{}\n{}", title, rule)
    } else {
        format!("{}\n{}", title.bold(), rule.dimmed())
    }
}

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply table style based on StyleMode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich | StyleMode::Minimal => {
            table.with(Style::rounded());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
