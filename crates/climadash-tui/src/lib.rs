//! Terminal dashboard for IoT temperature and humidity readings.
//!
//! This crate provides a standalone binary wrapper around climadash-cli's TUI functionality.
//! The actual TUI implementation lives in `climadash-cli` with the `tui` feature enabled.
//!
//! For the TUI implementation, see [`climadash_cli::tui`].

pub use climadash_cli::tui;
