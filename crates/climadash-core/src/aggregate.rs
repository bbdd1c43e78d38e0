//! Month filtering and per-day averaging of readings.
//!
//! [`MonthlyAggregator`] turns a flat list of readings into one
//! [`DailyAggregate`] per calendar day of a selected month. The month filter
//! looks at month-of-year only, so readings from the same month of different
//! years are all kept. Days are emitted in the order their first reading
//! appears in the input.
//!
//! # Example
//!
//! ```
//! use climadash_core::aggregate::MonthlyAggregator;
//! use climadash_types::Reading;
//! use time::{Month, macros::datetime};
//! # let reading = |id: &str, at, t: f64| Reading {
//! #     id: id.into(), date: at, internal_temperature: t, external_temperature: t,
//! #     internal_humidity: 50.0, external_humidity: 50.0,
//! # };
//!
//! let readings = vec![
//!     reading("a", datetime!(2024-05-01 08:00 UTC), 10.0),
//!     reading("b", datetime!(2024-05-01 20:00 UTC), 20.0),
//! ];
//!
//! let daily = MonthlyAggregator::default().aggregate(&readings, Month::May);
//! assert_eq!(daily.len(), 1);
//! assert_eq!(daily[0].average_internal_temperature, 15.0);
//! ```

use std::collections::HashMap;

use time::{Date, Month, UtcOffset};

use climadash_types::{DailyAggregate, Reading};

/// Groups readings of one month by calendar day and averages each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAggregator {
    offset: UtcOffset,
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl MonthlyAggregator {
    /// Create an aggregator that interprets timestamps in `offset`.
    ///
    /// The offset decides both which month a reading belongs to and which
    /// calendar day it is grouped under.
    #[must_use]
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Aggregate `readings` falling in `month` (any year) into per-day means.
    ///
    /// Returns an empty list when nothing matches.
    #[must_use]
    pub fn aggregate(&self, readings: &[Reading], month: Month) -> Vec<DailyAggregate> {
        let mut days: Vec<DayAccumulator> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for reading in readings {
            let local = reading.date.to_offset(self.offset);
            if local.month() != month {
                continue;
            }

            let key = day_key(local.date());
            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    days.push(DayAccumulator::new(key.clone()));
                    index.insert(key, days.len() - 1);
                    days.len() - 1
                }
            };
            days[slot].add(reading);
        }

        days.into_iter().map(DayAccumulator::finish).collect()
    }
}

/// Aggregate in UTC. Shorthand for `MonthlyAggregator::default().aggregate(..)`.
#[must_use]
pub fn aggregate_daily(readings: &[Reading], month: Month) -> Vec<DailyAggregate> {
    MonthlyAggregator::default().aggregate(readings, month)
}

/// Grouping key for a calendar day.
#[must_use]
pub fn day_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

/// Running sums for one day.
#[derive(Debug)]
struct DayAccumulator {
    day: String,
    count: usize,
    internal_temperature: f64,
    external_temperature: f64,
    internal_humidity: f64,
    external_humidity: f64,
}

impl DayAccumulator {
    fn new(day: String) -> Self {
        Self {
            day,
            count: 0,
            internal_temperature: 0.0,
            external_temperature: 0.0,
            internal_humidity: 0.0,
            external_humidity: 0.0,
        }
    }

    fn add(&mut self, reading: &Reading) {
        self.count += 1;
        self.internal_temperature += reading.internal_temperature;
        self.external_temperature += reading.external_temperature;
        self.internal_humidity += reading.internal_humidity;
        self.external_humidity += reading.external_humidity;
    }

    // count >= 1: an accumulator only exists once a reading was added.
    fn finish(self) -> DailyAggregate {
        let n = self.count as f64;
        DailyAggregate {
            day: self.day,
            samples: self.count,
            average_internal_temperature: self.internal_temperature / n,
            average_external_temperature: self.external_temperature / n,
            average_internal_humidity: self.internal_humidity / n,
            average_external_humidity: self.external_humidity / n,
        }
    }
}

// ==========================================================================
// Chart projections
// ==========================================================================

/// One bar series of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub values: Vec<f64>,
}

/// Data for one grouped bar chart: a label per day and two series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: &'static str,
    pub unit: &'static str,
    pub labels: Vec<String>,
    pub internal: ChartSeries,
    pub external: ChartSeries,
}

impl ChartData {
    /// Returns true if there are no days to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value across both series, or 0 when empty.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.internal
            .values
            .iter()
            .chain(&self.external.values)
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Internal vs external humidity per day.
#[must_use]
pub fn humidity_chart(aggregates: &[DailyAggregate]) -> ChartData {
    ChartData {
        title: "Internal vs External Humidity",
        unit: "%",
        labels: aggregates.iter().map(|a| a.day.clone()).collect(),
        internal: ChartSeries {
            label: "Internal humidity",
            values: aggregates.iter().map(|a| a.average_internal_humidity).collect(),
        },
        external: ChartSeries {
            label: "External humidity",
            values: aggregates.iter().map(|a| a.average_external_humidity).collect(),
        },
    }
}

/// Internal vs external temperature per day.
#[must_use]
pub fn temperature_chart(aggregates: &[DailyAggregate]) -> ChartData {
    ChartData {
        title: "Internal vs External Temperature",
        unit: "°C",
        labels: aggregates.iter().map(|a| a.day.clone()).collect(),
        internal: ChartSeries {
            label: "Internal temperature (°C)",
            values: aggregates
                .iter()
                .map(|a| a.average_internal_temperature)
                .collect(),
        },
        external: ChartSeries {
            label: "External temperature (°C)",
            values: aggregates
                .iter()
                .map(|a| a.average_external_temperature)
                .collect(),
        },
    }
}
