//! Client library for an IoT temperature and humidity readings API.
//!
//! This crate holds everything a dashboard front end needs short of drawing
//! pixels: an HTTP client for the two read endpoints, month filtering with
//! per-day averaging, pagination state, month selection and fetch
//! orchestration where only the latest request for a query is applied.
//!
//! # Features
//!
//! - **HTTP client**: [`ApiClient`] for `GET /temp` and `GET /temp/dates`
//! - **Daily aggregation**: [`MonthlyAggregator`] groups a month's readings by day
//! - **Pagination**: [`Pagination`] derives page count and skip from the total row count
//! - **Month selection**: [`MonthSelector`] with change notification
//! - **Fetch state**: [`QuerySlot`] tracks loading/ready/failed with generation numbers
//! - **Dashboard container**: [`Dashboard`] ties the above together without doing I/O
//! - **Testing**: [`MockSource`] stands in for the API
//!
//! # Quick Start
//!
//! ```no_run
//! use climadash_core::{ApiClient, MonthlyAggregator};
//! use time::Month;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(climadash_core::DEFAULT_API_URL)?;
//!
//!     let page = client.fetch_page(1, 15).await?;
//!     println!("{} readings in total", page.total_count);
//!
//!     let may = client.fetch_month(Month::May, 2024).await?;
//!     for day in MonthlyAggregator::default().aggregate(&may, Month::May) {
//!         println!("{day}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod messages;
pub mod mock;
pub mod pagination;
pub mod selector;
pub mod traits;

// Re-export types
pub use climadash_types;
pub use climadash_types::{DailyAggregate, Page, ParseError, RawReading, Reading};

pub use aggregate::{
    ChartData, ChartSeries, MonthlyAggregator, aggregate_daily, humidity_chart, temperature_chart,
};
pub use client::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use dashboard::{Dashboard, DashboardConfig, DashboardView};
pub use error::{Error, Result};
pub use fetch::{FetchState, QuerySlot};
pub use messages::{Command, DashboardEvent};
pub use mock::MockSource;
pub use pagination::{DEFAULT_PAGE_SIZE, Pagination};
pub use selector::MonthSelector;
pub use traits::ReadingSource;
