//! Command implementations for the CLI.

mod config;
mod daily;
mod readings;

pub use config::cmd_config;
pub use daily::{DailyArgs, cmd_daily};
pub use readings::{ReadingsArgs, cmd_readings};
