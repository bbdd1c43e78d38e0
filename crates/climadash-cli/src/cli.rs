//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::Month;

use climadash_cli::config::Config;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a format name stored in the config file.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables, icons, and full formatting (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format [default: text, or `format` from the config file]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Use Fahrenheit for temperature display (overrides --celsius and config)
    #[arg(long, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Use Celsius for temperature display (default, overrides config)
    #[arg(long, conflicts_with = "fahrenheit")]
    pub celsius: bool,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

impl OutputArgs {
    /// Resolve fahrenheit setting: explicit flags override config
    pub fn resolve_fahrenheit(&self, config_fahrenheit: bool) -> bool {
        if self.fahrenheit {
            true
        } else if self.celsius {
            false
        } else {
            config_fahrenheit
        }
    }

    /// Resolve the output format: `--json`, then `--format`, then config.
    pub fn resolve_format(&self, json: bool, config: &Config) -> OutputFormat {
        if json {
            return OutputFormat::Json;
        }
        self.format
            .or_else(|| config.format.as_deref().and_then(OutputFormat::from_config))
            .unwrap_or_default()
    }
}

#[derive(Parser)]
#[command(name = "climadash")]
#[command(
    author,
    version,
    about = "CLI and terminal dashboard for IoT temperature and humidity readings",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "CLIMADASH_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true, env = "CLIMADASH_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of readings, newest first as served by the API
    Readings {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Rows per page [default: 15, or `page_size` from the config file]
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=1000))]
        page_size: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show per-day averages for a month
    Daily {
        /// Month as 1-12 or a name (e.g. "may") [default: current month]
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<Month>,

        /// Year [default: current year, or `year` from the config file]
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Launch the interactive terminal dashboard
    #[cfg(feature = "tui")]
    Dashboard {
        /// Initial month as 1-12 or a name [default: current month]
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<Month>,

        /// Year [default: current year, or `year` from the config file]
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// API base URL
    ApiUrl,
    /// Rows per table page
    PageSize,
    /// Year used for month queries
    Year,
    /// Offset from UTC in whole hours
    UtcOffsetHours,
    /// Request timeout in seconds
    Timeout,
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
    /// Use Fahrenheit for temperature
    Fahrenheit,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}

/// Parse a month given as 1-12 or a name
fn parse_month_arg(s: &str) -> Result<Month, String> {
    climadash_types::parse_month(s).map_err(|_| {
        format!(
            "Invalid month '{}'. Use 1-12 or a month name (e.g. may, Sep)",
            s
        )
    })
}
