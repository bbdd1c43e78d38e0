//! Background worker for API requests.
//!
//! This module contains the [`FetchWorker`] which performs every HTTP request
//! in background tasks, keeping the UI loop responsive. The worker
//! communicates with the UI loop via channels:
//!
//! - Receives [`Command`]s from the UI to perform fetches
//! - Sends [`DashboardEvent`]s back with the results
//!
//! # Architecture
//!
//! Each fetch runs in its own Tokio task, so a slow month request never holds
//! up a page request. Results may therefore arrive in any order; the UI
//! discards stale ones by generation number. On shutdown the shared
//! [`CancellationToken`] aborts whatever is still in flight.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use climadash_core::ReadingSource;
use climadash_core::dashboard::execute;

use super::messages::{Command, DashboardEvent};

/// Background worker that runs fetch commands against a [`ReadingSource`].
pub struct FetchWorker {
    /// Where readings come from.
    source: Arc<dyn ReadingSource>,
    /// Receiver for commands from the UI loop.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI loop.
    event_tx: mpsc::Sender<DashboardEvent>,
    /// Cancels in-flight fetches on shutdown.
    cancel_token: CancellationToken,
}

impl FetchWorker {
    /// Create a new fetch worker.
    ///
    /// # Arguments
    ///
    /// * `source` - The API client (or a mock in tests)
    /// * `command_rx` - Channel receiver for commands from the UI
    /// * `event_tx` - Channel sender for events to the UI
    pub fn new(
        source: Arc<dyn ReadingSource>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<DashboardEvent>,
    ) -> Self {
        Self {
            source,
            command_rx,
            event_tx,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Token cancelled when the worker stops.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed.
    pub async fn run(mut self) {
        info!(source = %self.source.describe(), "FetchWorker started");

        loop {
            match self.command_rx.recv().await {
                Some(Command::Shutdown) => {
                    info!("FetchWorker received shutdown command");
                    break;
                }
                Some(cmd) => self.spawn_fetch(cmd),
                None => {
                    info!("Command channel closed, shutting down worker");
                    break;
                }
            }
        }

        self.cancel_token.cancel();
        info!("FetchWorker stopped");
    }

    /// Run one fetch in its own task.
    fn spawn_fetch(&self, cmd: Command) {
        debug!(?cmd, "Handling command");

        let source = Arc::clone(&self.source);
        let event_tx = self.event_tx.clone();
        let cancel_token = self.cancel_token.clone();

        tokio::spawn(async move {
            let event = tokio::select! {
                event = execute(source.as_ref(), cmd) => event,
                _ = cancel_token.cancelled() => {
                    debug!("Fetch cancelled");
                    return;
                }
            };

            if let Some(event) = event
                && let Err(e) = event_tx.send(event).await
            {
                debug!("UI loop gone, dropping event: {}", e);
            }
        });
    }
}
