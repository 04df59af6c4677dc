//! Pagination state.

use crate::row::RowItem;

/// Reviews requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Everything the store knows about what has been loaded.
///
/// Mutated only by [`PaginationStore`](super::PaginationStore) on the
/// rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub(crate) rows: Vec<RowItem>,
    /// Review rows in `rows`.
    pub(crate) review_count: usize,
    /// Latest server-reported total, 0 until the first page lands.
    pub(crate) total_count: usize,
    pub(crate) limit: usize,
    pub(crate) offset: usize,
    pub(crate) should_load: bool,
    pub(crate) is_loading: bool,
}

impl PageState {
    /// Empty state. A `limit` of 0 is raised to 1 so `offset` always
    /// advances.
    pub fn new(limit: usize) -> Self {
        Self {
            rows: Vec::new(),
            review_count: 0,
            total_count: 0,
            limit: limit.max(1),
            offset: 0,
            should_load: true,
            is_loading: false,
        }
    }

    pub fn rows(&self) -> &[RowItem] {
        &self.rows
    }

    pub fn review_count(&self) -> usize {
        self.review_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn should_load(&self) -> bool {
        self.should_load
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the counter row has been appended.
    pub fn has_counter(&self) -> bool {
        self.rows.last().is_some_and(RowItem::is_counter)
    }

    /// A fetch may start now.
    pub fn can_request(&self) -> bool {
        self.should_load && !self.is_loading
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            row_count: self.rows.len(),
            review_count: self.review_count,
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
            should_load: self.should_load,
            is_loading: self.is_loading,
            has_counter: self.has_counter(),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Immutable copy of the scalar state, carried by notifications.
///
/// Taken after a mutation batch completes, so counts and flags always
/// agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    pub row_count: usize,
    pub review_count: usize,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
    pub should_load: bool,
    pub is_loading: bool,
    pub has_counter: bool,
}
