//! Readings command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use climadash_core::ReadingSource;
use climadash_core::pagination::total_pages_for;

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, PageInfo, format_readings_csv, format_readings_json, format_readings_text,
};
use crate::style;
use crate::util::write_output;

/// Arguments for the readings command.
pub struct ReadingsArgs<'a> {
    pub page: u32,
    pub page_size: u32,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_readings(source: &dyn ReadingSource, args: ReadingsArgs<'_>) -> Result<()> {
    let ReadingsArgs {
        page,
        page_size,
        format,
        output,
        quiet,
        opts,
    } = args;

    let spinner = style::maybe_spinner(
        quiet || format != OutputFormat::Text,
        &format!("Fetching page {} from {}...", page, source.describe()),
    );
    let result = source.fetch_page(page, page_size).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let data = result.with_context(|| format!("Failed to fetch page {}", page))?;

    let info = PageInfo {
        page,
        page_size,
        total_pages: total_pages_for(data.total_count, page_size),
    };

    let content = match format {
        OutputFormat::Json => format_readings_json(&data, info, opts)?,
        OutputFormat::Csv => format_readings_csv(&data.readings, opts),
        OutputFormat::Text => format_readings_text(&data, info, opts),
    };

    write_output(output, &content)
}
