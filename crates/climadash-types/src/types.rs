//! Core types for temperature and humidity readings.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Month, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};

/// Offset-less timestamp layouts accepted in addition to RFC 3339.
///
/// Values in these layouts are interpreted as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]",
    "[year]-[month]-[day]T[hour]:[minute]:[second]",
    "[year]-[month]-[day] [hour]:[minute]:[second]",
];

/// A single sensor sample with internal/external temperature and humidity.
///
/// Every field is mandatory. Records arriving over the wire are first decoded
/// as [`RawReading`] and converted with [`Reading::try_from`], which rejects
/// incomplete records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Opaque unique identifier (`_id` on the wire).
    pub id: String,
    /// When the sample was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub date: OffsetDateTime,
    /// Indoor temperature in degrees Celsius.
    pub internal_temperature: f64,
    /// Outdoor temperature in degrees Celsius.
    pub external_temperature: f64,
    /// Indoor relative humidity in percent.
    pub internal_humidity: f64,
    /// Outdoor relative humidity in percent.
    pub external_humidity: f64,
}

/// A reading exactly as the API encodes it.
///
/// All fields are optional so that a single malformed record does not fail
/// decoding of a whole response.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawReading {
    #[cfg_attr(feature = "serde", serde(rename = "_id", default))]
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub internal_temperature: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub external_temperature: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub internal_humidity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub external_humidity: Option<f64>,
}

impl TryFrom<RawReading> for Reading {
    type Error = ParseError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or_else(|| ParseError::MissingField {
            id: "<unknown>".to_string(),
            field: "_id",
        })?;

        let missing = |field: &'static str| ParseError::MissingField {
            id: id.clone(),
            field,
        };

        let date = raw.date.as_deref().ok_or_else(|| missing("date"))?;
        let date = parse_timestamp(date)?;

        Ok(Self {
            internal_temperature: raw
                .internal_temperature
                .ok_or_else(|| missing("internalTemperature"))?,
            external_temperature: raw
                .external_temperature
                .ok_or_else(|| missing("externalTemperature"))?,
            internal_humidity: raw
                .internal_humidity
                .ok_or_else(|| missing("internalHumidity"))?,
            external_humidity: raw
                .external_humidity
                .ok_or_else(|| missing("externalHumidity"))?,
            id,
            date,
        })
    }
}

/// Parse a reading timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00.000Z`) and offset-less ISO layouts,
/// which are taken as UTC.
///
/// # Examples
///
/// ```
/// use climadash_types::parse_timestamp;
///
/// let dt = parse_timestamp("2024-05-01T12:30:00.000Z").unwrap();
/// assert_eq!(dt.hour(), 12);
///
/// let naive = parse_timestamp("2024-05-01T12:30:00").unwrap();
/// assert_eq!(dt, naive);
///
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> ParseResult<OffsetDateTime> {
    let value = value.trim();
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(dt);
    }

    for layout in NAIVE_TIMESTAMP_FORMATS {
        let format = time::format_description::parse(layout)
            .map_err(|e| ParseError::InvalidData(e.to_string()))?;
        if let Ok(dt) = PrimitiveDateTime::parse(value, &format) {
            return Ok(dt.assume_utc());
        }
    }

    Err(ParseError::InvalidTimestamp(value.to_string()))
}

/// Per-day averages of the four reading channels.
///
/// Derived on demand from a list of readings; never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyAggregate {
    /// Calendar day (`YYYY-MM-DD`) used as the grouping key.
    pub day: String,
    /// Number of readings averaged into this entry.
    pub samples: usize,
    pub average_internal_temperature: f64,
    pub average_external_temperature: f64,
    pub average_internal_humidity: f64,
    pub average_external_humidity: f64,
}

/// One page of the paginated readings endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page {
    /// Readings on this page, in server order.
    pub readings: Vec<Reading>,
    /// Total number of readings in the unfiltered dataset.
    pub total_count: u64,
    /// Records dropped from this page because they were incomplete.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skipped: usize,
}

impl Page {
    /// Returns true if the page holds no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Convert a 0-based month index (January = 0) into a [`Month`].
///
/// # Examples
///
/// ```
/// use climadash_types::month_from_index0;
/// use time::Month;
///
/// assert_eq!(month_from_index0(4), Ok(Month::May));
/// assert!(month_from_index0(12).is_err());
/// assert!(month_from_index0(-1).is_err());
/// ```
pub fn month_from_index0(index: i64) -> ParseResult<Month> {
    if !(0..=11).contains(&index) {
        return Err(ParseError::InvalidMonth(index));
    }
    Month::try_from(index as u8 + 1).map_err(|_| ParseError::InvalidMonth(index))
}

/// 0-based index of a month (January = 0).
#[must_use]
pub fn month_index0(month: Month) -> u8 {
    month as u8 - 1
}

/// English name of a month.
#[must_use]
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// Parse a month given as a 1-based number (`5`), a full English name
/// (`may`) or a three-letter abbreviation (`Sep`), case-insensitively.
///
/// # Examples
///
/// ```
/// use climadash_types::parse_month;
/// use time::Month;
///
/// assert_eq!(parse_month("5"), Ok(Month::May));
/// assert_eq!(parse_month("September"), Ok(Month::September));
/// assert_eq!(parse_month("dec"), Ok(Month::December));
/// assert!(parse_month("13").is_err());
/// ```
pub fn parse_month(value: &str) -> ParseResult<Month> {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        return month_from_index0(number - 1);
    }

    let lower = value.to_lowercase();
    (0..12)
        .filter_map(|i| month_from_index0(i).ok())
        .find(|&m| {
            let name = month_name(m).to_lowercase();
            lower == name || (lower.len() == 3 && name.starts_with(&lower))
        })
        .ok_or_else(|| ParseError::InvalidData(format!("unknown month '{}'", value)))
}

impl fmt::Display for DailyAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}°C / {:.1}°C, {:.1}% / {:.1}% ({} samples)",
            self.day,
            self.average_internal_temperature,
            self.average_external_temperature,
            self.average_internal_humidity,
            self.average_external_humidity,
            self.samples
        )
    }
}
