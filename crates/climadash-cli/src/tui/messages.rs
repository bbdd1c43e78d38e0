//! Message types for TUI communication between the UI loop and the worker.
//!
//! This module re-exports the shared message types from `climadash-core::messages`:
//!
//! - [`Command`]: Messages sent from the UI loop to the background worker
//! - [`DashboardEvent`]: Results sent from the worker back to the UI loop

pub use climadash_core::messages::{Command, DashboardEvent};
