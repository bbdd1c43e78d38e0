//! Daily averages command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use time::Month;

use climadash_core::{MonthlyAggregator, ReadingSource};
use climadash_types::month_name;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_daily_csv, format_daily_json, format_daily_text};
use crate::style;
use crate::util::write_output;

/// Arguments for the daily command.
pub struct DailyArgs<'a> {
    pub month: Month,
    pub year: i32,
    pub aggregator: MonthlyAggregator,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_daily(source: &dyn ReadingSource, args: DailyArgs<'_>) -> Result<()> {
    let DailyArgs {
        month,
        year,
        aggregator,
        format,
        output,
        quiet,
        opts,
    } = args;

    let period = format!("{} {}", month_name(month), year);
    let spinner = style::maybe_spinner(
        quiet || format != OutputFormat::Text,
        &format!("Fetching readings for {}...", period),
    );
    let result = source.fetch_month(month, year).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let readings = result.with_context(|| format!("Failed to fetch readings for {}", period))?;

    let daily = aggregator.aggregate(&readings, month);
    tracing::debug!(
        readings = readings.len(),
        days = daily.len(),
        "Aggregated {}",
        period
    );

    let content = match format {
        OutputFormat::Json => format_daily_json(&daily, month, year, opts)?,
        OutputFormat::Csv => format_daily_csv(&daily, opts),
        OutputFormat::Text => format_daily_text(&daily, month, year, opts),
    };

    write_output(output, &content)
}
