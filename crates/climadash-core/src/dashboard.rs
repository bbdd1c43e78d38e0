//! Dashboard state container.
//!
//! [`Dashboard`] owns everything the dashboard screen shows: the table page
//! ([`Pagination`] plus a [`QuerySlot`] for the page data), the selected
//! month ([`MonthSelector`] plus a slot for that month's readings) and the
//! year the month is fetched for. It never performs I/O itself. State changes
//! return [`Command`]s for a worker to run, and the worker's
//! [`DashboardEvent`]s are fed back through [`Dashboard::apply`].
//!
//! ```
//! use climadash_core::dashboard::{Dashboard, DashboardConfig, DashboardView};
//! use climadash_core::messages::DashboardEvent;
//! use climadash_types::Page;
//!
//! let mut dashboard = Dashboard::new(DashboardConfig::default());
//! let commands = dashboard.start();
//! assert_eq!(commands.len(), 2);
//! assert!(matches!(dashboard.view(), DashboardView::Loading));
//!
//! let generation = dashboard.page_state().generation();
//! dashboard.apply(DashboardEvent::PageLoaded {
//!     generation,
//!     page: Page { readings: vec![], total_count: 0, skipped: 0 },
//! });
//! assert!(matches!(dashboard.view(), DashboardView::Ready { total_pages: 0, .. }));
//! ```

use time::{Month, OffsetDateTime, UtcOffset};
use tracing::{debug, warn};

use climadash_types::{DailyAggregate, Page, Reading};

use crate::aggregate::MonthlyAggregator;
use crate::error::Result;
use crate::fetch::{FetchState, QuerySlot};
use crate::messages::{Command, DashboardEvent};
use crate::pagination::{DEFAULT_PAGE_SIZE, Pagination};
use crate::selector::MonthSelector;
use crate::traits::ReadingSource;

/// Initial settings for a [`Dashboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Rows per table page.
    pub page_size: u32,
    /// Year passed to the month endpoint.
    pub year: i32,
    /// Offset used for "current month" and for day grouping.
    pub offset: UtcOffset,
    /// Initial month; `None` means the current month.
    pub month: Option<Month>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            year: OffsetDateTime::now_utc().year(),
            offset: UtcOffset::UTC,
            month: None,
        }
    }
}

/// What the table area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView<'a> {
    /// The latest page request failed.
    Failed(&'a str),
    /// No page data yet.
    Loading,
    /// Page data is available. `refreshing` is set while a newer request for
    /// another page is in flight.
    Ready {
        readings: &'a [Reading],
        page: u32,
        total_pages: u32,
        refreshing: bool,
    },
}

/// Explicit dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    pagination: Pagination,
    selector: MonthSelector,
    aggregator: MonthlyAggregator,
    year: i32,
    page: QuerySlot<Page>,
    month_readings: QuerySlot<Vec<Reading>>,
}

impl Dashboard {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let selector = match config.month {
            Some(month) => MonthSelector::new(month),
            None => MonthSelector::current(config.offset),
        };
        Self {
            pagination: Pagination::new(config.page_size),
            selector,
            aggregator: MonthlyAggregator::new(config.offset),
            year: config.year,
            page: QuerySlot::default(),
            month_readings: QuerySlot::default(),
        }
    }

    /// Commands for the initial page and month fetches.
    pub fn start(&mut self) -> Vec<Command> {
        vec![self.page_command(), self.month_command()]
    }

    /// Refetch both queries.
    pub fn refresh(&mut self) -> Vec<Command> {
        self.start()
    }

    /// Move to `page`; returns a fetch command if the page changed.
    pub fn go_to_page(&mut self, page: u32) -> Option<Command> {
        self.pagination
            .set_page(page)
            .then(|| self.page_command())
    }

    pub fn next_page(&mut self) -> Option<Command> {
        let page = self.pagination.next_page()?;
        self.go_to_page(page)
    }

    pub fn previous_page(&mut self) -> Option<Command> {
        let page = self.pagination.previous_page()?;
        self.go_to_page(page)
    }

    pub fn first_page(&mut self) -> Option<Command> {
        let page = self.pagination.first_page()?;
        self.go_to_page(page)
    }

    pub fn last_page(&mut self) -> Option<Command> {
        let page = self.pagination.last_page()?;
        self.go_to_page(page)
    }

    /// Select `month`; returns a fetch command if the month changed.
    pub fn select_month(&mut self, month: Month) -> Option<Command> {
        self.selector
            .select(month)
            .then(|| self.month_command())
    }

    /// Select a month by 0-based index. Out-of-range indices are an error.
    pub fn select_month_index(&mut self, index: i64) -> Result<Option<Command>> {
        let changed = self.selector.select_index(index)?;
        Ok(changed.then(|| self.month_command()))
    }

    pub fn next_month(&mut self) -> Option<Command> {
        let month = self.selector.month().next();
        self.select_month(month)
    }

    pub fn previous_month(&mut self) -> Option<Command> {
        let month = self.selector.month().previous();
        self.select_month(month)
    }

    /// Change the year passed to the month endpoint.
    pub fn set_year(&mut self, year: i32) -> Option<Command> {
        if self.year == year {
            return None;
        }
        self.year = year;
        Some(self.month_command())
    }

    /// Apply a worker event. Returns false when it was stale and ignored.
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        match event {
            DashboardEvent::PageLoaded { generation, page } => {
                let total = page.total_count;
                let applied = self.page.resolve(generation, Ok::<_, String>(page));
                if applied {
                    self.pagination.set_total_count(total);
                } else {
                    debug!(generation, "Discarding stale page response");
                }
                applied
            }
            DashboardEvent::PageFailed { generation, error } => {
                let applied = self.page.resolve::<String>(generation, Err(error));
                if applied {
                    warn!(error = ?self.page.error(), "Page fetch failed");
                }
                applied
            }
            DashboardEvent::MonthLoaded {
                generation,
                month,
                year,
                readings,
            } => {
                let count = readings.len();
                let applied = self
                    .month_readings
                    .resolve(generation, Ok::<_, String>(readings));
                if applied {
                    debug!(%month, year, count, "Month readings applied");
                } else {
                    debug!(generation, %month, "Discarding stale month response");
                }
                applied
            }
            DashboardEvent::MonthFailed { generation, error } => {
                let applied = self.month_readings.resolve::<String>(generation, Err(error));
                if applied {
                    warn!(error = ?self.month_readings.error(), "Month fetch failed");
                }
                applied
            }
        }
    }

    /// Table area state.
    #[must_use]
    pub fn view(&self) -> DashboardView<'_> {
        match self.page.state() {
            FetchState::Failed { error, .. } => DashboardView::Failed(error),
            state => match state.data() {
                Some(page) => DashboardView::Ready {
                    readings: &page.readings,
                    page: self.pagination.page(),
                    total_pages: self.pagination.total_pages(),
                    refreshing: state.is_loading(),
                },
                None => DashboardView::Loading,
            },
        }
    }

    /// Per-day averages of the selected month, for the charts.
    #[must_use]
    pub fn daily_aggregates(&self) -> Vec<DailyAggregate> {
        match self.month_readings.data() {
            Some(readings) => self.aggregator.aggregate(readings, self.selector.month()),
            None => Vec::new(),
        }
    }

    /// Non-fatal failure of the latest month fetch.
    #[must_use]
    pub fn month_error(&self) -> Option<&str> {
        self.month_readings.error()
    }

    #[must_use]
    pub fn month_loading(&self) -> bool {
        self.month_readings.is_loading()
    }

    #[must_use]
    pub fn month(&self) -> Month {
        self.selector.month()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Offset used for day grouping and for displaying timestamps.
    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.aggregator.offset()
    }

    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    #[must_use]
    pub fn selector(&self) -> &MonthSelector {
        &self.selector
    }

    #[must_use]
    pub fn page_state(&self) -> &QuerySlot<Page> {
        &self.page
    }

    #[must_use]
    pub fn month_state(&self) -> &QuerySlot<Vec<Reading>> {
        &self.month_readings
    }

    fn page_command(&mut self) -> Command {
        Command::FetchPage {
            generation: self.page.begin(),
            page: self.pagination.page(),
            page_size: self.pagination.page_size(),
        }
    }

    fn month_command(&mut self) -> Command {
        Command::FetchMonth {
            generation: self.month_readings.begin(),
            month: self.selector.month(),
            year: self.year,
        }
    }
}

/// Run one fetch command against `source` and turn the outcome into an event.
///
/// Returns `None` for [`Command::Shutdown`].
pub async fn execute<S: ReadingSource + ?Sized>(
    source: &S,
    command: Command,
) -> Option<DashboardEvent> {
    match command {
        Command::FetchPage {
            generation,
            page,
            page_size,
        } => Some(match source.fetch_page(page, page_size).await {
            Ok(page) => DashboardEvent::PageLoaded { generation, page },
            Err(e) => DashboardEvent::PageFailed {
                generation,
                error: e.to_string(),
            },
        }),
        Command::FetchMonth {
            generation,
            month,
            year,
        } => Some(match source.fetch_month(month, year).await {
            Ok(readings) => DashboardEvent::MonthLoaded {
                generation,
                month,
                year,
                readings,
            },
            Err(e) => DashboardEvent::MonthFailed {
                generation,
                error: e.to_string(),
            },
        }),
        Command::Shutdown => None,
    }
}
