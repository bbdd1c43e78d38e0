//! Keyboard input handling for the TUI.
//!
//! Key events are first mapped to an [`Action`] by [`handle_key`], then
//! [`apply_action`] changes the [`App`] and returns the fetch commands the
//! change requires.
//!
//! # Key Bindings
//!
//! | Key             | Action               |
//! |-----------------|----------------------|
//! | `q`             | Quit                 |
//! | `←` / `h`       | Previous page        |
//! | `→` / `l`       | Next page            |
//! | `Home` / `g`    | First page           |
//! | `End` / `G`     | Last page            |
//! | `[`             | Previous month       |
//! | `]`             | Next month           |
//! | `1`-`9`         | January to September |
//! | `0` `-` `=`     | October to December  |
//! | `r`             | Refresh              |
//! | `f`             | Toggle °C / °F       |
//! | `t`             | Toggle theme         |
//! | `?`             | Toggle help          |

use crossterm::event::KeyCode;
use tracing::warn;

use super::app::App;
use super::messages::Command;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Show the next table page.
    NextPage,
    /// Show the previous table page.
    PreviousPage,
    /// Jump to the first table page.
    FirstPage,
    /// Jump to the last table page.
    LastPage,
    /// Select the following month, wrapping December to January.
    NextMonth,
    /// Select the preceding month, wrapping January to December.
    PreviousMonth,
    /// Select a month by 0-based index.
    SelectMonth(u8),
    /// Refetch the page and the month.
    Refresh,
    /// Toggle Celsius / Fahrenheit.
    ToggleUnits,
    /// Toggle theme.
    ToggleTheme,
    /// Toggle the help overlay.
    ToggleHelp,
    /// No action (unrecognized key).
    None,
}

/// Map a key code to an action.
///
/// While the help overlay is open, `Esc` closes it instead of quitting.
pub fn handle_key(key: KeyCode, help_visible: bool) -> Action {
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc if help_visible => Action::ToggleHelp,
        KeyCode::Esc => Action::Quit,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Action::NextPage,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Action::PreviousPage,
        KeyCode::Home | KeyCode::Char('g') => Action::FirstPage,
        KeyCode::End | KeyCode::Char('G') => Action::LastPage,
        KeyCode::Char(']') => Action::NextMonth,
        KeyCode::Char('[') => Action::PreviousMonth,
        KeyCode::Char(c @ '1'..='9') => Action::SelectMonth(c as u8 - b'1'),
        KeyCode::Char('0') => Action::SelectMonth(9),
        KeyCode::Char('-') => Action::SelectMonth(10),
        KeyCode::Char('=') => Action::SelectMonth(11),
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('f') => Action::ToggleUnits,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns the commands to send to the worker. Navigation that does not
/// change the page or month returns nothing.
pub fn apply_action(app: &mut App, action: Action) -> Vec<Command> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            Vec::new()
        }
        Action::NextPage => app.dashboard.next_page().into_iter().collect(),
        Action::PreviousPage => app.dashboard.previous_page().into_iter().collect(),
        Action::FirstPage => app.dashboard.first_page().into_iter().collect(),
        Action::LastPage => app.dashboard.last_page().into_iter().collect(),
        Action::NextMonth => app.dashboard.next_month().into_iter().collect(),
        Action::PreviousMonth => app.dashboard.previous_month().into_iter().collect(),
        Action::SelectMonth(index) => match app.dashboard.select_month_index(i64::from(index)) {
            Ok(cmd) => cmd.into_iter().collect(),
            Err(e) => {
                warn!("Rejected month selection: {}", e);
                app.push_status_message(e.to_string());
                Vec::new()
            }
        },
        Action::Refresh => {
            app.push_status_message("Refreshing...".to_string());
            app.dashboard.refresh()
        }
        Action::ToggleUnits => {
            app.toggle_units();
            Vec::new()
        }
        Action::ToggleTheme => {
            app.toggle_theme();
            Vec::new()
        }
        Action::ToggleHelp => {
            app.show_help = !app.show_help;
            Vec::new()
        }
        Action::None => Vec::new(),
    }
}
