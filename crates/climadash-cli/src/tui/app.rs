//! Application state for the TUI.
//!
//! [`App`] wraps the I/O-free [`Dashboard`] with what only the terminal front
//! end needs: transient status messages, the help overlay, unit and theme
//! toggles and the spinner.

use std::time::Instant;

use tokio::sync::mpsc;

use climadash_core::Dashboard;

use super::messages::{Command, DashboardEvent};

/// Maximum number of status messages kept at once.
const MAX_STATUS_MESSAGES: usize = 5;

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Main application state.
pub struct App {
    /// Set when the user asked to quit.
    pub should_quit: bool,
    /// Page, month and fetch state.
    pub dashboard: Dashboard,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Show temperatures in Fahrenheit.
    pub fahrenheit: bool,
    /// Current color theme.
    pub theme: Theme,
    /// Where readings come from, shown in the header.
    pub source_label: String,
    /// Transient messages with their creation time.
    pub status_messages: Vec<(String, Instant)>,
    /// Seconds before a status message expires.
    pub status_message_timeout: u64,
    /// Receiver for worker events.
    pub event_rx: mpsc::Receiver<DashboardEvent>,
    /// Current spinner animation frame.
    pub spinner_frame: usize,
}

impl App {
    pub fn new(
        dashboard: Dashboard,
        event_rx: mpsc::Receiver<DashboardEvent>,
        source_label: String,
        fahrenheit: bool,
    ) -> Self {
        Self {
            should_quit: false,
            dashboard,
            show_help: false,
            fahrenheit,
            theme: Theme::default(),
            source_label,
            status_messages: Vec::new(),
            status_message_timeout: 5,
            event_rx,
            spinner_frame: 0,
        }
    }

    /// Commands for the initial fetches.
    pub fn start(&mut self) -> Vec<Command> {
        self.dashboard.start()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a worker event to the dashboard.
    ///
    /// A month failure that is still current becomes a status message; page
    /// failures are shown by the table view instead.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        let month_failed = matches!(event, DashboardEvent::MonthFailed { .. });
        let applied = self.dashboard.apply(event);

        if applied
            && month_failed
            && let Some(error) = self.dashboard.month_error()
        {
            let message = format!("Chart data unavailable: {}", error);
            self.push_status_message(message);
        }
    }

    /// Whether any request is in flight.
    pub fn is_loading(&self) -> bool {
        self.dashboard.page_state().is_loading() || self.dashboard.month_loading()
    }

    /// Convert a Celsius value for display, with unit.
    pub fn format_temp(&self, celsius: f64) -> String {
        if self.fahrenheit {
            format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0)
        } else {
            format!("{:.1}°C", celsius)
        }
    }

    /// Switch between Celsius and Fahrenheit.
    pub fn toggle_units(&mut self) {
        self.fahrenheit = !self.fahrenheit;
        let unit = if self.fahrenheit {
            "Fahrenheit"
        } else {
            "Celsius"
        };
        self.push_status_message(format!("Temperatures in {}", unit));
    }

    /// Switch between dark and light themes.
    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    /// Get the AppTheme for the current theme setting.
    pub fn app_theme(&self) -> super::ui::theme::AppTheme {
        match self.theme {
            Theme::Dark => super::ui::theme::AppTheme::dark(),
            Theme::Light => super::ui::theme::AppTheme::light(),
        }
    }

    /// Add a status message to be displayed.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = std::time::Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    /// Get the current status message to display.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    /// Advance the spinner animation.
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// Get the current spinner character.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }
}
