//! Pagination state for the readings table.
//!
//! [`Pagination`] tracks the current 1-based page, the page size and the
//! server-reported total row count, and derives the page count from them.

/// Page size used by the dashboard unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Number of rows to skip to reach a 1-based `page`.
///
/// Page 0 is treated like page 1.
///
/// ```
/// use climadash_core::pagination::skip_for;
///
/// assert_eq!(skip_for(1, 15), 0);
/// assert_eq!(skip_for(3, 15), 30);
/// ```
#[must_use]
pub fn skip_for(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}

/// Number of pages needed for `total_count` rows; 0 when there are no rows.
///
/// ```
/// use climadash_core::pagination::total_pages_for;
///
/// assert_eq!(total_pages_for(0, 15), 0);
/// assert_eq!(total_pages_for(31, 15), 3);
/// assert_eq!(total_pages_for(30, 15), 2);
/// ```
#[must_use]
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    if total_count == 0 || page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Current page, page size and total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start on page 1 with no known rows.
    ///
    /// A page size of 0 is raised to 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Record the total row count reported by the server.
    pub fn set_total_count(&mut self, total_count: u64) {
        self.total_count = total_count;
    }

    /// Derived page count.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages_for(self.total_count, self.page_size)
    }

    /// Rows to skip for the current page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        skip_for(self.page, self.page_size)
    }

    /// Whether page controls should be shown at all.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.total_pages() > 0
    }

    /// Move to `page`. Returns whether the page changed.
    ///
    /// The value is stored as given; callers only offer pages in
    /// `1..=total_pages()`.
    pub fn set_page(&mut self, page: u32) -> bool {
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Target of a "next page" control, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages()).then(|| self.page + 1)
    }

    /// Target of a "previous page" control, if there is one.
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        (self.page > 1 && self.total_pages() > 0).then(|| (self.page - 1).min(self.total_pages()))
    }

    /// Target of a "last page" control, if there is one.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        let last = self.total_pages();
        (last > 0 && self.page != last).then_some(last)
    }

    /// Target of a "first page" control, if there is one.
    #[must_use]
    pub fn first_page(&self) -> Option<u32> {
        (self.page != 1 && self.total_pages() > 0).then_some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 15);
        assert_eq!(pagination.total_count(), 0);
        assert_eq!(pagination.total_pages(), 0);
        assert!(!pagination.should_render());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut pagination = Pagination::new(15);
        pagination.set_total_count(31);
        assert_eq!(pagination.total_pages(), 3);

        pagination.set_total_count(15);
        assert_eq!(pagination.total_pages(), 1);

        pagination.set_total_count(1);
        assert_eq!(pagination.total_pages(), 1);
        assert!(pagination.should_render());
    }

    #[test]
    fn test_skip_for_page_three() {
        let mut pagination = Pagination::new(15);
        pagination.set_total_count(100);
        assert!(pagination.set_page(3));
        assert_eq!(pagination.skip(), 30);
    }

    #[test]
    fn test_set_page_reports_change() {
        let mut pagination = Pagination::new(15);
        assert!(!pagination.set_page(1));
        assert!(pagination.set_page(2));
        assert!(!pagination.set_page(2));
    }

    #[test]
    fn test_set_page_does_not_clamp() {
        let mut pagination = Pagination::new(15);
        pagination.set_total_count(31);
        assert!(pagination.set_page(99));
        assert_eq!(pagination.page(), 99);
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        let pagination = Pagination::new(0);
        assert_eq!(pagination.page_size(), 1);
    }

    #[test]
    fn test_navigation_targets() {
        let mut pagination = Pagination::new(15);
        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.previous_page(), None);

        pagination.set_total_count(31);
        assert_eq!(pagination.next_page(), Some(2));
        assert_eq!(pagination.previous_page(), None);
        assert_eq!(pagination.first_page(), None);
        assert_eq!(pagination.last_page(), Some(3));

        pagination.set_page(3);
        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.previous_page(), Some(2));
        assert_eq!(pagination.first_page(), Some(1));
        assert_eq!(pagination.last_page(), None);
    }

    #[test]
    fn test_previous_page_after_total_shrinks() {
        let mut pagination = Pagination::new(10);
        pagination.set_total_count(100);
        pagination.set_page(10);
        pagination.set_total_count(25);
        assert_eq!(pagination.previous_page(), Some(3));
    }
}
