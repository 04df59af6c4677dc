//! Review fetch collaborator.

use crate::model::{FetchError, ReviewsPage};

/// Fetches one page of reviews.
///
/// Called on the worker context, never on the rendering context, so it
/// may block.
pub trait ReviewFetcher: Send + Sync {
    /// Fetch `limit` reviews starting at `offset`.
    ///
    /// # Errors
    ///
    /// Transport and decode failures. Both are retryable.
    fn fetch(&self, offset: usize, limit: usize) -> Result<ReviewsPage, FetchError>;
}

/// Result of one fetch, marshalled back to the rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    pub offset: usize,
    pub limit: usize,
    pub result: Result<ReviewsPage, FetchError>,
}
