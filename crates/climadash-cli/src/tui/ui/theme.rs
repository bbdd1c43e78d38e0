//! Dark and light palettes for the dashboard.
//!
//! Every widget reads its colors from an [`AppTheme`] so `t` can switch the
//! whole screen at once. Internal (indoor) values are drawn in orange and
//! external (outdoor) values in blue, in the charts and the table alike.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Colors used by the dashboard widgets.
#[derive(Debug, Clone, Copy)]
pub struct AppTheme {
    /// Titles, the selected month, spinners and key names.
    pub primary: Color,

    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    /// Indoor series.
    pub internal: Color,
    /// Outdoor series.
    pub external: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Border of the readings table and the help overlay.
    pub border_active: Color,
    /// Border of the month bar and the charts.
    pub border_inactive: Color,

    /// Frame background. `Color::Reset` keeps the terminal's own.
    pub bg: Color,
    pub bg_column_header: Color,
    pub bg_header: Color,
}

impl AppTheme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(34, 211, 238), // cyan-400
            warning: Color::Rgb(251, 191, 36), // amber-400
            danger: Color::Rgb(248, 113, 113), // red-400
            info: Color::Rgb(96, 165, 250),    // blue-400

            internal: Color::Rgb(251, 146, 60), // orange-400
            external: Color::Rgb(96, 165, 250), // blue-400

            text_primary: Color::Rgb(248, 250, 252),
            text_secondary: Color::Rgb(148, 163, 184),
            text_muted: Color::Rgb(100, 116, 139),

            border_active: Color::Rgb(34, 211, 238),
            border_inactive: Color::Rgb(71, 85, 105),

            bg: Color::Reset,
            bg_column_header: Color::Rgb(51, 65, 85),
            bg_header: Color::Rgb(30, 41, 59),
        }
    }

    /// Light palette. Accents are one shade darker than in [`AppTheme::dark`]
    /// to stay readable on the pale background.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(8, 145, 178),  // cyan-600
            warning: Color::Rgb(217, 119, 6),  // amber-600
            danger: Color::Rgb(220, 38, 38),   // red-600
            info: Color::Rgb(37, 99, 235),     // blue-600

            internal: Color::Rgb(234, 88, 12), // orange-600
            external: Color::Rgb(37, 99, 235), // blue-600

            text_primary: Color::Rgb(15, 23, 42),
            text_secondary: Color::Rgb(71, 85, 105),
            text_muted: Color::Rgb(148, 163, 184),

            border_active: Color::Rgb(8, 145, 178),
            border_inactive: Color::Rgb(203, 213, 225),

            bg: Color::Rgb(248, 250, 252),
            bg_column_header: Color::Rgb(226, 232, 240),
            bg_header: Color::Rgb(241, 245, 249),
        }
    }

    #[must_use]
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    #[must_use]
    pub fn border_inactive_style(&self) -> Style {
        Style::default().fg(self.border_inactive)
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Top bar with the title, source and unit.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header)
    }

    /// Column headings of the readings table.
    #[must_use]
    pub fn table_header_style(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .bg(self.bg_column_header)
            .add_modifier(Modifier::BOLD)
    }
}

pub const BORDER_TYPE: BorderType = BorderType::Rounded;
