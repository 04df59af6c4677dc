//! File-backed review fetcher.
//!
//! Serves pages out of one JSON document shaped like a server response
//! (`{"items": [...], "count": N}`), re-reading it on every fetch so edits
//! show up on the next page.

use crate::model::error::InputError;
use crate::model::{decode_page, FetchError, ReviewsPage};
use crate::pagination::ReviewFetcher;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Reads review pages from a JSON file.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
    latency: Duration,
}

impl FileFetcher {
    /// Create a fetcher for `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            latency: Duration::ZERO,
        })
    }

    /// Sleep this long before every fetch, to make loading visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<ReviewsPage, FetchError> {
        let bytes = std::fs::read(&self.path)?;
        decode_page(&bytes)
    }
}

/// `items[offset..offset + limit]`, empty past the end.
pub(crate) fn page_slice(document: ReviewsPage, offset: usize, limit: usize) -> ReviewsPage {
    let ReviewsPage { items, total_count } = document;
    let items = items.into_iter().skip(offset).take(limit).collect();
    ReviewsPage { items, total_count }
}

impl ReviewFetcher for FileFetcher {
    fn fetch(&self, offset: usize, limit: usize) -> Result<ReviewsPage, FetchError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let page = page_slice(self.read_document()?, offset, limit);
        debug!(
            path = %self.path.display(),
            offset,
            served = page.items.len(),
            total_count = page.total_count,
            "Served page from file"
        );
        Ok(page)
    }
}
