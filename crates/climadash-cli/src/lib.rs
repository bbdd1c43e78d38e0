//! Command-line interface and terminal dashboard for an IoT temperature and
//! humidity readings API.
//!
//! # Features
//!
//! - **Paged readings**: List readings page by page, as the dashboard table does
//! - **Daily averages**: Per-day means of a month's readings
//! - **Terminal dashboard**: Month bar charts plus a paginated readings table
//! - **Multiple output formats**: Text, JSON, and CSV output support
//! - **Configuration file**: Persistent settings for API URL, page size and units
//! - **Shell completions**: Generate completions for bash, zsh, fish, and PowerShell
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `readings` | Show one page of readings |
//! | `daily` | Show per-day averages for a month |
//! | `dashboard` | Launch the interactive terminal dashboard |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! The CLI stores configuration in `~/.config/climadash/config.toml` (or platform equivalent).
//! Configuration options include:
//!
//! - `api_url`: API base URL
//! - `page_size`: Rows per page (default 15)
//! - `year`: Year used for month queries (default: current year)
//! - `utc_offset_hours`: Offset used to group readings into days
//! - `timeout`: Request timeout in seconds
//! - `format`: Default output format
//! - `no_color`: Disable colored output
//! - `fahrenheit`: Use Fahrenheit for temperature display
//!
//! # Environment Variables
//!
//! - `CLIMADASH_API_URL`: API base URL (overridden by `--api-url` flag)
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! Show the third page of readings:
//! ```bash
//! climadash readings --page 3
//! ```
//!
//! Export May's daily averages as CSV:
//! ```bash
//! climadash daily --month may --year 2024 --format csv --output may.csv
//! ```

pub mod config;
pub mod logging;

// Re-export core dependencies for convenience
pub use climadash_core;
pub use climadash_types;

// TUI module - publicly exposed for climadash-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;
