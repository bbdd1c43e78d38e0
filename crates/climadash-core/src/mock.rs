//! In-memory reading source for testing.
//!
//! [`MockSource`] implements [`ReadingSource`] over a fixed list of readings,
//! so dashboard logic and the fetch worker can be exercised without a
//! network.
//!
//! # Features
//!
//! - **Failure injection**: fail every call, or only the next few
//! - **Latency simulation**: delay all calls, or only specific pages, to
//!   reproduce out-of-order responses

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use time::Month;
use tokio::sync::RwLock;

use climadash_types::{Page, Reading};

use crate::error::{Error, Result};
use crate::pagination::skip_for;
use crate::traits::ReadingSource;

/// A fake readings API backed by a `Vec<Reading>`.
///
/// # Example
///
/// ```
/// use climadash_core::{MockSource, ReadingSource};
///
/// #[tokio::main]
/// async fn main() {
///     let source = MockSource::new(Vec::new());
///     let page = source.fetch_page(1, 15).await.unwrap();
///     assert_eq!(page.total_count, 0);
///
///     source.set_should_fail(true, Some("offline"));
///     assert!(source.fetch_page(1, 15).await.is_err());
/// }
/// ```
pub struct MockSource {
    readings: RwLock<Vec<Reading>>,
    should_fail: AtomicBool,
    fail_message: std::sync::RwLock<String>,
    remaining_failures: AtomicU32,
    /// Delay applied to every call in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    page_delays: RwLock<HashMap<u32, Duration>>,
    page_calls: AtomicU32,
    month_calls: AtomicU32,
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .field("page_calls", &self.page_calls.load(Ordering::Relaxed))
            .field("month_calls", &self.month_calls.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockSource {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self {
            readings: RwLock::new(readings),
            should_fail: AtomicBool::new(false),
            fail_message: std::sync::RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(0),
            latency_ms: AtomicU64::new(0),
            page_delays: RwLock::new(HashMap::new()),
            page_calls: AtomicU32::new(0),
            month_calls: AtomicU32::new(0),
        }
    }

    // --- Test control methods ---

    /// Replace the stored readings.
    pub async fn set_readings(&self, readings: Vec<Reading>) {
        *self.readings.write().await = readings;
    }

    /// Make every call fail (or succeed again) with an HTTP 500 error.
    pub fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message
            && let Ok(mut guard) = self.fail_message.write()
        {
            *guard = msg.to_string();
        }
    }

    /// Fail the next `count` calls, then recover.
    pub fn set_transient_failures(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Delay every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Delay page fetches for `page` by an extra `delay`.
    pub async fn set_page_delay(&self, page: u32, delay: Duration) {
        self.page_delays.write().await.insert(page, delay);
    }

    /// Number of page fetches served so far.
    pub fn page_calls(&self) -> u32 {
        self.page_calls.load(Ordering::Relaxed)
    }

    /// Number of month fetches served so far.
    pub fn month_calls(&self) -> u32 {
        self.month_calls.load(Ordering::Relaxed)
    }

    async fn check_should_fail(&self) -> Result<()> {
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        let transient = self
            .remaining_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();

        if transient || self.should_fail.load(Ordering::Relaxed) {
            let message = self
                .fail_message
                .read()
                .map(|m| m.clone())
                .unwrap_or_else(|_| "Mock failure".to_string());
            return Err(Error::Api {
                status: 500,
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReadingSource for MockSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page> {
        self.page_calls.fetch_add(1, Ordering::Relaxed);

        let delay = self.page_delays.read().await.get(&page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_should_fail().await?;

        let readings = self.readings.read().await;
        let skip = usize::try_from(skip_for(page, page_size)).unwrap_or(usize::MAX);
        let slice = readings
            .iter()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(Page {
            readings: slice,
            total_count: readings.len() as u64,
            skipped: 0,
        })
    }

    async fn fetch_month(&self, month: Month, year: i32) -> Result<Vec<Reading>> {
        self.month_calls.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail().await?;

        Ok(self
            .readings
            .read()
            .await
            .iter()
            .filter(|r| r.date.month() == month && r.date.year() == year)
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use time::macros::datetime;

    fn reading(id: usize, date: OffsetDateTime) -> Reading {
        Reading {
            id: id.to_string(),
            date,
            internal_temperature: 20.0,
            external_temperature: 15.0,
            internal_humidity: 40.0,
            external_humidity: 60.0,
        }
    }

    fn thirty_one() -> Vec<Reading> {
        (0..31)
            .map(|i| reading(i, datetime!(2024-05-01 00:00 UTC)))
            .collect()
    }

    #[tokio::test]
    async fn test_fetch_page_slices() {
        let source = MockSource::new(thirty_one());

        let first = source.fetch_page(1, 15).await.unwrap();
        assert_eq!(first.readings.len(), 15);
        assert_eq!(first.total_count, 31);
        assert_eq!(first.readings[0].id, "0");

        let third = source.fetch_page(3, 15).await.unwrap();
        assert_eq!(third.readings.len(), 1);
        assert_eq!(third.readings[0].id, "30");

        let beyond = source.fetch_page(9, 15).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(source.page_calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_month_filters_month_and_year() {
        let source = MockSource::new(vec![
            reading(1, datetime!(2024-05-01 10:00 UTC)),
            reading(2, datetime!(2023-05-01 10:00 UTC)),
            reading(3, datetime!(2024-06-01 10:00 UTC)),
        ]);

        let may = source.fetch_month(Month::May, 2024).await.unwrap();
        assert_eq!(may.len(), 1);
        assert_eq!(may[0].id, "1");
        assert_eq!(source.month_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let source = MockSource::default();
        source.set_should_fail(true, Some("offline"));

        let err = source.fetch_page(1, 15).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
        assert!(err.to_string().contains("offline"));

        source.set_should_fail(false, None);
        assert!(source.fetch_page(1, 15).await.is_ok());
    }

    #[tokio::test]
    async fn test_transient_failures() {
        let source = MockSource::default();
        source.set_transient_failures(2);

        assert!(source.fetch_month(Month::May, 2024).await.is_err());
        assert!(source.fetch_month(Month::May, 2024).await.is_err());
        assert!(source.fetch_month(Month::May, 2024).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let source = MockSource::default();
        source.set_latency(Duration::from_millis(200));

        let start = tokio::time::Instant::now();
        source.fetch_page(1, 15).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
