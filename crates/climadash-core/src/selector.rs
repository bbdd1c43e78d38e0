//! Selected-month state for the charts.
//!
//! [`MonthSelector`] holds a [`time::Month`] and broadcasts changes through a
//! [`tokio::sync::watch`] channel so several consumers can follow the
//! selection without polling.

use time::{Month, OffsetDateTime, UtcOffset};
use tokio::sync::watch;
use tracing::debug;

use climadash_types::month_from_index0;

use crate::error::{Error, Result};

/// The month whose readings feed the charts.
#[derive(Debug)]
pub struct MonthSelector {
    tx: watch::Sender<Month>,
}

impl Default for MonthSelector {
    fn default() -> Self {
        Self::current(UtcOffset::UTC)
    }
}

impl MonthSelector {
    /// Start on `month`.
    #[must_use]
    pub fn new(month: Month) -> Self {
        let (tx, _rx) = watch::channel(month);
        Self { tx }
    }

    /// Start on the current month as seen from `offset`.
    #[must_use]
    pub fn current(offset: UtcOffset) -> Self {
        Self::new(OffsetDateTime::now_utc().to_offset(offset).month())
    }

    /// The selected month.
    #[must_use]
    pub fn month(&self) -> Month {
        *self.tx.borrow()
    }

    /// Select `month`. Returns whether the selection changed.
    pub fn select(&self, month: Month) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == month {
                return false;
            }
            *current = month;
            true
        });
        if changed {
            debug!(%month, "Month selected");
        }
        changed
    }

    /// Select by 0-based index (0 = January).
    ///
    /// Returns [`Error::InvalidMonth`] for anything outside 0..=11 and leaves
    /// the selection untouched.
    pub fn select_index(&self, index: i64) -> Result<bool> {
        let month = month_from_index0(index).map_err(|_| Error::InvalidMonth(index))?;
        Ok(self.select(month))
    }

    /// Advance one month, wrapping December to January.
    pub fn next(&self) -> Month {
        let month = self.month().next();
        self.select(month);
        month
    }

    /// Go back one month, wrapping January to December.
    pub fn previous(&self) -> Month {
        let month = self.month().previous();
        self.select(month);
        month
    }

    /// Receiver notified on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Month> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_reports_change() {
        let selector = MonthSelector::new(Month::May);
        assert!(!selector.select(Month::May));
        assert!(selector.select(Month::June));
        assert_eq!(selector.month(), Month::June);
    }

    #[test]
    fn test_select_index_accepts_zero_to_eleven() {
        let selector = MonthSelector::new(Month::May);
        assert!(selector.select_index(0).unwrap());
        assert_eq!(selector.month(), Month::January);
        assert!(selector.select_index(11).unwrap());
        assert_eq!(selector.month(), Month::December);
    }

    #[test]
    fn test_select_index_rejects_out_of_range() {
        let selector = MonthSelector::new(Month::May);
        assert!(matches!(
            selector.select_index(12),
            Err(Error::InvalidMonth(12))
        ));
        assert!(matches!(
            selector.select_index(-1),
            Err(Error::InvalidMonth(-1))
        ));
        assert_eq!(selector.month(), Month::May);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let selector = MonthSelector::new(Month::December);
        assert_eq!(selector.next(), Month::January);
        assert_eq!(selector.previous(), Month::December);
    }

    #[tokio::test]
    async fn test_subscriber_sees_changes() {
        let selector = MonthSelector::new(Month::March);
        let mut rx = selector.subscribe();
        assert_eq!(*rx.borrow(), Month::March);

        selector.select(Month::April);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Month::April);

        // Re-selecting the same month does not notify.
        selector.select(Month::April);
        assert!(!rx.has_changed().unwrap());
    }
}
