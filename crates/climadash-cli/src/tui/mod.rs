//! Main entry point for the TUI dashboard.
//!
//! This module ties together all the TUI components and provides the main
//! event loop for the terminal user interface. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination

pub mod app;
pub mod errors;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::App;
pub use messages::{Command, DashboardEvent};
pub use worker::FetchWorker;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use time::Month;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use climadash_core::{ApiClient, Dashboard, DashboardConfig, ReadingSource};

use crate::config::{
    Config, resolve_api_url, resolve_offset, resolve_page_size, resolve_timeout, resolve_year,
};

/// Settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub api_url: String,
    pub timeout: Duration,
    pub dashboard: DashboardConfig,
    pub fahrenheit: bool,
}

impl TuiOptions {
    /// Resolve options from the config file and an optional URL override.
    pub fn from_config(config: &Config, api_url: Option<&str>) -> Result<Self> {
        Ok(Self {
            api_url: resolve_api_url(api_url, config),
            timeout: resolve_timeout(config),
            dashboard: DashboardConfig {
                page_size: resolve_page_size(None, config),
                year: resolve_year(None, config),
                offset: resolve_offset(config)?,
                month: None,
            },
            fahrenheit: config.fahrenheit,
        })
    }

    /// Start on `month` instead of the current month.
    #[must_use]
    pub fn with_month(mut self, month: Option<Month>) -> Self {
        self.dashboard.month = month.or(self.dashboard.month);
        self
    }

    /// Fetch months of `year`.
    #[must_use]
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        if let Some(year) = year {
            self.dashboard.year = year;
        }
        self
    }
}

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI against the readings API.
pub async fn run(options: TuiOptions) -> Result<()> {
    let client = ApiClient::with_timeout(&options.api_url, options.timeout)
        .with_context(|| format!("Cannot use API URL '{}'", options.api_url))?;
    run_with_source(Arc::new(client), options).await
}

/// Run the TUI against any reading source.
///
/// This:
/// 1. Creates communication channels between UI and worker
/// 2. Spawns the background fetch worker
/// 3. Sends the initial page and month fetches
/// 4. Runs the main event loop
/// 5. Ensures graceful shutdown
pub async fn run_with_source(source: Arc<dyn ReadingSource>, options: TuiOptions) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<DashboardEvent>(32);

    let source_label = source.describe();
    info!(source = %source_label, "Starting dashboard");

    let worker = FetchWorker::new(source, cmd_rx, event_tx);
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(
        Dashboard::new(options.dashboard),
        event_rx,
        source_label,
        options.fahrenheit,
    );

    let mut terminal = setup_terminal()?;

    dispatch(&cmd_tx, app.start()).await;

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    if cmd_tx.send(Command::Shutdown).await.is_err() {
        debug!("Worker already stopped");
    }

    restore_terminal()?;

    let _ = worker_handle.await;

    result
}

/// Send commands to the worker, waiting for queue space.
///
/// The dashboard has already marked the matching slots as loading, so a
/// command is never dropped on a full queue. Returns how many were delivered.
async fn dispatch(command_tx: &mpsc::Sender<Command>, commands: Vec<Command>) -> usize {
    let mut delivered = 0;
    for cmd in commands {
        match command_tx.send(cmd).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!(command = ?e.0, "Fetch worker is gone, command dropped"),
        }
    }
    delivered
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.show_help);
            dispatch(command_tx, input::apply_action(app, action)).await;
        }

        // Non-blocking receive of fetch results
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_event(event);
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
