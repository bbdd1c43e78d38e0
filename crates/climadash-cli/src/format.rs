//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Month, OffsetDateTime, UtcOffset};

use climadash_types::{DailyAggregate, Page, Reading, month_name};

use crate::cli::StyleMode;
use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use Fahrenheit for temperatures.
    pub fahrenheit: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
    /// Offset used when printing timestamps.
    pub offset: UtcOffset,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            fahrenheit: false,
            no_header: false,
            compact: false,
            style: StyleMode::Rich,
            offset: UtcOffset::UTC,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, fahrenheit: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        let effective_no_color = no_color || style == StyleMode::Plain;
        Self {
            no_color: effective_no_color,
            fahrenheit,
            style,
            ..Self::default()
        }
    }

    /// Check if plain styling is enabled (no decorations).
    pub fn is_plain(&self) -> bool {
        self.style == StyleMode::Plain
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Create with the timestamp display offset.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Temperature unit suffix.
    /// Uses ASCII-only output for Plain mode (pipe-friendly).
    #[must_use]
    pub fn temp_unit(&self) -> &'static str {
        match (self.fahrenheit, self.is_plain()) {
            (true, true) => "F",
            (true, false) => "°F",
            (false, true) => "C",
            (false, false) => "°C",
        }
    }

    /// Format temperature with unit and comfort color.
    #[must_use]
    pub fn format_temp(&self, celsius: f64) -> String {
        format!(
            "{}{}",
            style::format_temp_colored(celsius, self.convert_temp(celsius), self.no_color),
            self.temp_unit()
        )
    }

    /// Convert temperature value (for CSV/JSON output).
    #[must_use]
    pub fn convert_temp(&self, celsius: f64) -> f64 {
        if self.fahrenheit {
            celsius * 9.0 / 5.0 + 32.0
        } else {
            celsius
        }
    }

    /// Format a timestamp as `YYYY-MM-DD HH:MM` in the display offset.
    #[must_use]
    pub fn format_date(&self, date: OffsetDateTime) -> String {
        date.to_offset(self.offset)
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .unwrap_or_else(|_| "Unknown".to_string())
    }

    fn temp_csv_header(&self) -> &'static str {
        if self.fahrenheit {
            "temperature_f"
        } else {
            "temperature_c"
        }
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
/// Double quotes are escaped by doubling them.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn rfc3339(date: OffsetDateTime) -> String {
    date.format(&Rfc3339).unwrap_or_default()
}

// ============================================================================
// Readings page formatting
// ============================================================================

/// Position of a page within the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[must_use]
pub fn format_readings_text(page: &Page, info: PageInfo, opts: &FormatOptions) -> String {
    use tabled::builder::Builder;

    if page.is_empty() {
        return if info.total_pages > 0 && info.page > info.total_pages {
            format!(
                "No readings on page {} (last page is {}).\n",
                info.page, info.total_pages
            )
        } else {
            "No readings found.\n".to_string()
        };
    }

    let mut output = format!(
        "Readings (page {} of {}, {} total):\n\n",
        info.page, info.total_pages, page.total_count
    );

    let mut builder = Builder::default();
    builder.push_record([
        "Internal temperature",
        "External temperature",
        "Internal humidity",
        "External humidity",
        "Date",
    ]);

    for reading in &page.readings {
        builder.push_record([
            opts.format_temp(reading.internal_temperature),
            opts.format_temp(reading.external_temperature),
            style::format_humidity_colored(reading.internal_humidity, opts.no_color),
            style::format_humidity_colored(reading.external_humidity, opts.no_color),
            opts.format_date(reading.date),
        ]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push('\n');

    if page.skipped > 0 {
        output.push_str(&style::format_warning(
            &format!("{} incomplete record(s) on this page were skipped", page.skipped),
            opts.no_color,
        ));
        output.push('\n');
    }

    if info.page < info.total_pages {
        output.push_str(&format!(
            "(Use --page {} for the next page)\n",
            info.page + 1
        ));
    }

    output
}

#[must_use]
pub fn format_readings_csv(readings: &[Reading], opts: &FormatOptions) -> String {
    let temp = opts.temp_csv_header();
    let mut output = if opts.no_header {
        String::new()
    } else {
        format!(
            "id,date,internal_{temp},external_{temp},internal_humidity,external_humidity\n"
        )
    };
    for reading in readings {
        output.push_str(&format!(
            "{},{},{:.1},{:.1},{:.1},{:.1}\n",
            csv_escape(&reading.id),
            rfc3339(reading.date),
            opts.convert_temp(reading.internal_temperature),
            opts.convert_temp(reading.external_temperature),
            reading.internal_humidity,
            reading.external_humidity,
        ));
    }
    output
}

/// Format a readings page as JSON with temperature unit conversion applied.
pub fn format_readings_json(page: &Page, info: PageInfo, opts: &FormatOptions) -> Result<String> {
    #[derive(Serialize)]
    struct ReadingJson<'a> {
        id: &'a str,
        date: String,
        internal_temperature: f64,
        external_temperature: f64,
        internal_humidity: f64,
        external_humidity: f64,
    }

    #[derive(Serialize)]
    struct PageJson<'a> {
        page: u32,
        page_size: u32,
        total_pages: u32,
        total_count: u64,
        skipped: usize,
        temperature_unit: &'static str,
        readings: Vec<ReadingJson<'a>>,
    }

    let readings = page
        .readings
        .iter()
        .map(|r| ReadingJson {
            id: &r.id,
            date: rfc3339(r.date),
            internal_temperature: opts.convert_temp(r.internal_temperature),
            external_temperature: opts.convert_temp(r.external_temperature),
            internal_humidity: r.internal_humidity,
            external_humidity: r.external_humidity,
        })
        .collect();

    opts.as_json(&PageJson {
        page: info.page,
        page_size: info.page_size,
        total_pages: info.total_pages,
        total_count: page.total_count,
        skipped: page.skipped,
        temperature_unit: if opts.fahrenheit { "F" } else { "C" },
        readings,
    })
}

// ============================================================================
// Daily averages formatting
// ============================================================================

#[must_use]
pub fn format_daily_text(
    daily: &[DailyAggregate],
    month: Month,
    year: i32,
    opts: &FormatOptions,
) -> String {
    use tabled::builder::Builder;

    let period = format!("{} {}", month_name(month), year);
    if daily.is_empty() {
        return format!("No readings for {}.\n", period);
    }

    let mut output = style::format_title(&format!("Daily averages, {}", period), opts.no_color);
    output.push_str("\n\n");

    let mut builder = Builder::default();
    builder.push_record([
        "Day",
        "Samples",
        "Internal temperature",
        "External temperature",
        "Internal humidity",
        "External humidity",
    ]);

    for day in daily {
        builder.push_record([
            day.day.clone(),
            day.samples.to_string(),
            opts.format_temp(day.average_internal_temperature),
            opts.format_temp(day.average_external_temperature),
            style::format_humidity_colored(day.average_internal_humidity, opts.no_color),
            style::format_humidity_colored(day.average_external_humidity, opts.no_color),
        ]);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table, opts.style);
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[must_use]
pub fn format_daily_csv(daily: &[DailyAggregate], opts: &FormatOptions) -> String {
    let temp = opts.temp_csv_header();
    let mut output = if opts.no_header {
        String::new()
    } else {
        format!(
            "day,samples,internal_{temp},external_{temp},internal_humidity,external_humidity\n"
        )
    };
    for day in daily {
        output.push_str(&format!(
            "{},{},{:.2},{:.2},{:.2},{:.2}\n",
            day.day,
            day.samples,
            opts.convert_temp(day.average_internal_temperature),
            opts.convert_temp(day.average_external_temperature),
            day.average_internal_humidity,
            day.average_external_humidity,
        ));
    }
    output
}

/// Format daily averages as JSON with temperature unit conversion applied.
pub fn format_daily_json(
    daily: &[DailyAggregate],
    month: Month,
    year: i32,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct DayJson<'a> {
        day: &'a str,
        samples: usize,
        internal_temperature: f64,
        external_temperature: f64,
        internal_humidity: f64,
        external_humidity: f64,
    }

    #[derive(Serialize)]
    struct DailyJson<'a> {
        month: u8,
        year: i32,
        temperature_unit: &'static str,
        days: Vec<DayJson<'a>>,
    }

    let days = daily
        .iter()
        .map(|d| DayJson {
            day: &d.day,
            samples: d.samples,
            internal_temperature: opts.convert_temp(d.average_internal_temperature),
            external_temperature: opts.convert_temp(d.average_external_temperature),
            internal_humidity: d.average_internal_humidity,
            external_humidity: d.average_external_humidity,
        })
        .collect();

    opts.as_json(&DailyJson {
        month: month as u8,
        year,
        temperature_unit: if opts.fahrenheit { "F" } else { "C" },
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn plain() -> FormatOptions {
        FormatOptions::new(true, false, StyleMode::Plain)
    }

    fn reading(id: &str) -> Reading {
        Reading {
            id: id.to_string(),
            date: datetime!(2024-05-01 12:30 UTC),
            internal_temperature: 21.5,
            external_temperature: 10.0,
            internal_humidity: 45.0,
            external_humidity: 80.0,
        }
    }

    fn page(readings: Vec<Reading>, total_count: u64) -> Page {
        Page {
            readings,
            total_count,
            skipped: 0,
        }
    }

    fn daily() -> Vec<DailyAggregate> {
        vec![DailyAggregate {
            day: "2024-05-01".to_string(),
            samples: 2,
            average_internal_temperature: 15.0,
            average_external_temperature: 10.0,
            average_internal_humidity: 50.0,
            average_external_humidity: 60.0,
        }]
    }

    // ========================================================================
    // FormatOptions tests
    // ========================================================================

    #[test]
    fn test_plain_style_disables_color() {
        let opts = FormatOptions::new(false, false, StyleMode::Plain);
        assert!(opts.no_color);
        assert_eq!(opts.temp_unit(), "C");
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let opts = FormatOptions::new(true, true, StyleMode::Rich);
        assert!((opts.convert_temp(100.0) - 212.0).abs() < 1e-9);
        assert_eq!(opts.format_temp(0.0), "32.0°F");
    }

    #[test]
    fn test_format_date_applies_offset() {
        let opts = plain().with_offset(UtcOffset::from_hms(2, 0, 0).unwrap());
        assert_eq!(
            opts.format_date(datetime!(2024-05-01 23:15 UTC)),
            "2024-05-02 01:15"
        );
    }

    #[test]
    fn test_as_json_compact() {
        let opts = plain().with_compact(true);
        assert_eq!(opts.as_json(&[1, 2]).unwrap(), "[1,2]\n");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    // ========================================================================
    // Readings tests
    // ========================================================================

    #[test]
    fn test_readings_text_has_columns() {
        let info = PageInfo {
            page: 1,
            page_size: 15,
            total_pages: 3,
        };
        let text = format_readings_text(&page(vec![reading("a")], 31), info, &plain());

        assert!(text.starts_with("Readings (page 1 of 3, 31 total):"));
        assert!(text.contains("Internal temperature"));
        assert!(text.contains("External humidity"));
        assert!(text.contains("21.5C"));
        assert!(text.contains("2024-05-01 12:30"));
        assert!(text.contains("--page 2"));
    }

    #[test]
    fn test_readings_text_empty() {
        let info = PageInfo {
            page: 1,
            page_size: 15,
            total_pages: 0,
        };
        assert_eq!(
            format_readings_text(&Page::default(), info, &plain()),
            "No readings found.\n"
        );

        let beyond = PageInfo {
            page: 9,
            total_pages: 3,
            ..info
        };
        assert!(format_readings_text(&Page::default(), beyond, &plain()).contains("last page is 3"));
    }

    #[test]
    fn test_readings_text_notes_skipped() {
        let info = PageInfo {
            page: 1,
            page_size: 15,
            total_pages: 1,
        };
        let mut p = page(vec![reading("a")], 2);
        p.skipped = 1;
        assert!(format_readings_text(&p, info, &plain()).contains("1 incomplete record(s)"));
    }

    #[test]
    fn test_readings_csv() {
        let csv = format_readings_csv(&[reading("a,b")], &plain());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "id,date,internal_temperature_c,external_temperature_c,internal_humidity,external_humidity"
            )
        );
        assert_eq!(
            lines.next(),
            Some("\"a,b\",2024-05-01T12:30:00Z,21.5,10.0,45.0,80.0")
        );

        let no_header = format_readings_csv(&[reading("a")], &plain().with_no_header(true));
        assert_eq!(no_header.lines().count(), 1);
    }

    #[test]
    fn test_readings_json() {
        let info = PageInfo {
            page: 2,
            page_size: 15,
            total_pages: 3,
        };
        let opts = FormatOptions::new(true, true, StyleMode::Rich);
        let json = format_readings_json(&page(vec![reading("a")], 31), info, &opts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["page"], 2);
        assert_eq!(value["total_count"], 31);
        assert_eq!(value["temperature_unit"], "F");
        assert_eq!(value["readings"][0]["id"], "a");
        assert_eq!(value["readings"][0]["external_temperature"], 50.0);
    }

    // ========================================================================
    // Daily tests
    // ========================================================================

    #[test]
    fn test_daily_text() {
        let text = format_daily_text(&daily(), Month::May, 2024, &plain());
        assert!(text.starts_with("Daily averages, May 2024"));
        assert!(text.contains("2024-05-01"));
        assert!(text.contains("15.0C"));
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_daily_text_empty() {
        assert_eq!(
            format_daily_text(&[], Month::June, 2024, &plain()),
            "No readings for June 2024.\n"
        );
    }

    #[test]
    fn test_daily_csv() {
        let csv = format_daily_csv(&daily(), &plain());
        assert_eq!(
            csv,
            "day,samples,internal_temperature_c,external_temperature_c,internal_humidity,external_humidity\n\
             2024-05-01,2,15.00,10.00,50.00,60.00\n"
        );
    }

    #[test]
    fn test_daily_json() {
        let json = format_daily_json(&daily(), Month::May, 2024, &plain()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["month"], 5);
        assert_eq!(value["year"], 2024);
        assert_eq!(value["days"][0]["samples"], 2);
        assert_eq!(value["days"][0]["internal_temperature"], 15.0);
    }
}
