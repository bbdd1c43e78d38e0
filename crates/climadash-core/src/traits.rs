//! Trait abstractions over reading providers.
//!
//! This module provides the [`ReadingSource`] trait that abstracts over the
//! real HTTP API client and the in-memory mock used in tests.

use async_trait::async_trait;
use time::Month;

use climadash_types::{Page, Reading};

use crate::error::Result;

/// Anything that can answer the two read queries of the dashboard.
///
/// Both operations are independent; implementations must allow them to run
/// concurrently.
///
/// # Example
///
/// ```ignore
/// use climadash_core::{ReadingSource, Result};
///
/// async fn print_first_page<S: ReadingSource>(source: &S) -> Result<()> {
///     let page = source.fetch_page(1, 15).await?;
///     println!("{} readings in total", page.total_count);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch a 1-based page of the full, unfiltered reading list.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page>;

    /// Fetch every reading whose date falls in `month` of `year`.
    async fn fetch_month(&self, month: Month, year: i32) -> Result<Vec<Reading>>;

    /// Short human-readable description of where readings come from.
    fn describe(&self) -> String {
        "unknown source".to_string()
    }
}
