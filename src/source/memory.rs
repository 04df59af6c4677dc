//! In-memory review fetcher.

use super::file::page_slice;
use crate::model::{FetchError, ReviewPayload, ReviewsPage};
use crate::pagination::ReviewFetcher;

/// Serves a fixed list of reviews.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    items: Vec<ReviewPayload>,
    reported_total: Option<usize>,
}

impl MemoryFetcher {
    pub fn new(items: Vec<ReviewPayload>) -> Self {
        Self {
            items,
            reported_total: None,
        }
    }

    /// Report `total` instead of the real item count, to mimic an
    /// inconsistent server.
    pub fn with_reported_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }
}

impl ReviewFetcher for MemoryFetcher {
    fn fetch(&self, offset: usize, limit: usize) -> Result<ReviewsPage, FetchError> {
        let document = ReviewsPage {
            items: self.items.clone(),
            total_count: self.reported_total.unwrap_or(self.items.len()),
        };
        Ok(page_slice(document, offset, limit))
    }
}
