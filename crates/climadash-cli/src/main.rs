use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use time::OffsetDateTime;

use climadash_cli::config::{
    Config, resolve_api_url, resolve_offset, resolve_page_size, resolve_timeout, resolve_year,
};
use climadash_cli::logging;
use climadash_core::MonthlyAggregator;

mod cli;
mod commands;
mod format;
mod style;
mod util;

use cli::{Cli, Commands};
use commands::{DailyArgs, ReadingsArgs, cmd_config, cmd_daily, cmd_readings};
use format::FormatOptions;
use util::build_client;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "climadash", &mut io::stdout());
        return Ok(());
    }

    // The dashboard owns the terminal, so it logs to a file instead.
    #[cfg(feature = "tui")]
    let is_dashboard = matches!(cli.command, Commands::Dashboard { .. });
    #[cfg(not(feature = "tui"))]
    let is_dashboard = false;

    if is_dashboard {
        logging::init_file(cli.verbose);
    } else {
        logging::init(cli.quiet, cli.verbose);
    }

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let offset = resolve_offset(&config)?;
    let api_url = resolve_api_url(cli.api_url.as_deref(), &config);
    let timeout = resolve_timeout(&config);
    tracing::debug!(%api_url, ?timeout, %offset, "Resolved settings");

    match cli.command {
        Commands::Readings {
            page,
            page_size,
            output,
        } => {
            let client = build_client(&api_url, timeout)?;
            let opts = FormatOptions::new(
                no_color,
                output.resolve_fahrenheit(config.fahrenheit),
                cli.style,
            )
            .with_no_header(output.no_header)
            .with_compact(cli.compact)
            .with_offset(offset);
            cmd_readings(
                &client,
                ReadingsArgs {
                    page,
                    page_size: resolve_page_size(page_size, &config),
                    format: output.resolve_format(cli.json, &config),
                    output: cli.output.as_ref(),
                    quiet: cli.quiet,
                    opts: &opts,
                },
            )
            .await?;
        }
        Commands::Daily {
            month,
            year,
            output,
        } => {
            let client = build_client(&api_url, timeout)?;
            let month = month.unwrap_or_else(|| OffsetDateTime::now_utc().to_offset(offset).month());
            let opts = FormatOptions::new(
                no_color,
                output.resolve_fahrenheit(config.fahrenheit),
                cli.style,
            )
            .with_no_header(output.no_header)
            .with_compact(cli.compact)
            .with_offset(offset);
            cmd_daily(
                &client,
                DailyArgs {
                    month,
                    year: resolve_year(year, &config),
                    aggregator: MonthlyAggregator::new(offset),
                    format: output.resolve_format(cli.json, &config),
                    output: cli.output.as_ref(),
                    quiet: cli.quiet,
                    opts: &opts,
                },
            )
            .await?;
        }
        #[cfg(feature = "tui")]
        Commands::Dashboard { month, year } => {
            let options = climadash_cli::tui::TuiOptions::from_config(&config, Some(&api_url))?
                .with_month(month)
                .with_year(year);
            climadash_cli::tui::run(options).await?;
        }
        Commands::Config { action } => {
            cmd_config(action, &Config::path(), no_color)?;
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
