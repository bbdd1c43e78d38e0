//! Tracing subscriber setup.
//!
//! Command-line runs log to stderr. The dashboard owns the terminal, so it
//! logs to `climadash.log` in the cache directory instead, or nowhere when
//! that file cannot be created.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Build the filter: `--quiet` wins over `--verbose`, otherwise `RUST_LOG`
/// or `info`.
pub fn filter(quiet: bool, verbose: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Log to stderr.
pub fn init(quiet: bool, verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(quiet, verbose))
        .with_writer(std::io::stderr)
        .init();
}

/// Path of the dashboard log file.
pub fn log_file_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("climadash")
        .join("climadash.log")
}

/// Log to the dashboard log file.
pub fn init_file(verbose: bool) {
    let writer = match open_log_file() {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter(false, verbose))
        .with_ansi(false)
        .with_writer(writer)
        .init();
}

fn open_log_file() -> Option<File> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
