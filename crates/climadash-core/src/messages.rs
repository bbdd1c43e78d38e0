//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI loop       | --------------> |   FetchWorker    |
//! |   (Dashboard)    |                 |  (tokio runtime) |
//! |                  | <-------------- |                  |
//! +------------------+ DashboardEvent  +------------------+
//! ```
//!
//! Every fetch carries the generation number handed out by the requesting
//! [`QuerySlot`](crate::fetch::QuerySlot); the matching event echoes it back
//! so stale answers can be recognised.

use time::Month;

use climadash_types::{Page, Reading};

/// Commands sent from the UI loop to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one page of the full reading list.
    FetchPage {
        generation: u64,
        page: u32,
        page_size: u32,
    },

    /// Fetch all readings of a month.
    FetchMonth {
        generation: u64,
        month: Month,
        year: i32,
    },

    /// Stop the worker and cancel in-flight requests.
    Shutdown,
}

/// Events sent from the worker back to the UI loop.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    PageLoaded { generation: u64, page: Page },

    PageFailed { generation: u64, error: String },

    MonthLoaded {
        generation: u64,
        month: Month,
        year: i32,
        readings: Vec<Reading>,
    },

    MonthFailed { generation: u64, error: String },
}

