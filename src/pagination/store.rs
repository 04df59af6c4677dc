//! The pagination store.
//!
//! Owns [`PageState`] and every transition on it. All methods run on the
//! rendering context; the only work that leaves it is the fetch itself,
//! which runs on a [`Worker`] and comes back as a [`FetchCompletion`]
//! through a channel drained by [`PaginationStore::poll`].
//!
//! # Single flight
//!
//! `request_next_page` is gated on `should_load && !is_loading`. The gate
//! closes before the job is handed to the worker and reopens only when the
//! completion is applied, so at most one fetch is ever outstanding no
//! matter how often scrolling asks.
//!
//! # Notifications
//!
//! Events are queued after a mutation batch finishes and drained with
//! [`PaginationStore::take_events`]. A merge that appended rows produces
//! `ItemsInserted` immediately followed by `StateChanged`.

use super::fetch::{FetchCompletion, ReviewFetcher};
use super::state::{PageState, StateSnapshot};
use crate::model::{FetchError, ReviewsPage, RowId};
use crate::row::{CounterRow, RowBuilder, RowItem};
use crate::worker::Worker;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Change notification for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Rows at these indices were appended.
    ItemsInserted(Range<usize>),
    /// Some part of the state changed; carries the state after the change.
    StateChanged(StateSnapshot),
}

/// Single source of truth for which rows exist and in what order.
pub struct PaginationStore {
    state: PageState,
    builder: RowBuilder,
    fetcher: Arc<dyn ReviewFetcher>,
    worker: Arc<dyn Worker>,
    completions_tx: Sender<FetchCompletion>,
    completions_rx: Receiver<FetchCompletion>,
    events: Vec<StoreEvent>,
}

impl PaginationStore {
    pub fn new(
        fetcher: Arc<dyn ReviewFetcher>,
        worker: Arc<dyn Worker>,
        builder: RowBuilder,
        limit: usize,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            state: PageState::new(limit),
            builder,
            fetcher,
            worker,
            completions_tx,
            completions_rx,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn rows(&self) -> &[RowItem] {
        self.state.rows()
    }

    pub fn row(&self, index: usize) -> Option<&RowItem> {
        self.state.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.state.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.rows.is_empty()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Index of the review row with `id`.
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.state.rows.iter().position(|row| row.id() == Some(id))
    }

    /// Start fetching the next page unless one is in flight or none is due.
    ///
    /// Returns whether a fetch was issued.
    pub fn request_next_page(&mut self) -> bool {
        if !self.state.can_request() {
            return false;
        }

        self.state.is_loading = true;
        self.state.should_load = false;
        self.notify_state_changed();

        let offset = self.state.offset;
        let limit = self.state.limit;
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.completions_tx.clone();
        debug!(offset, limit, "Fetching review page");

        self.worker.spawn(Box::new(move || {
            let result = fetcher.fetch(offset, limit);
            let completion = FetchCompletion {
                offset,
                limit,
                result,
            };
            if tx.send(completion).is_err() {
                debug!(offset, "Store torn down before fetch completed, discarding page");
            }
        }));

        true
    }

    /// Apply every completion that has arrived. Never blocks.
    ///
    /// Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.completions_rx.try_recv() {
                Ok(completion) => {
                    self.apply(completion);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Block up to `timeout` for one completion and apply it.
    ///
    /// Returns whether one was applied.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.completions_rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply(completion);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn apply(&mut self, completion: FetchCompletion) {
        match completion.result {
            Ok(page) => self.merge_page(page),
            Err(error) => self.fail_page(&error),
        }
    }

    /// Merge a successfully fetched page.
    ///
    /// Items past the server-reported total are dropped rather than
    /// appended, and a server that lowers its total never removes rows.
    /// The counter row carries the number of reviews actually listed.
    pub fn merge_page(&mut self, page: ReviewsPage) {
        let ReviewsPage { items, total_count } = page;
        let start = self.state.rows.len();
        // Once the counter row lands the list is closed.
        let complete = self.state.has_counter();
        let remaining = if complete {
            0
        } else {
            total_count.saturating_sub(self.state.review_count)
        };

        let received = items.len();
        let accepted = received.min(remaining);
        if accepted < received {
            debug!(received, accepted, total_count, "Dropping items past the reported total");
        }
        for payload in items.into_iter().take(accepted) {
            let row = self.builder.build(payload);
            self.state.rows.push(RowItem::Review(row));
        }
        self.state.review_count += accepted;
        self.state.total_count = total_count;

        self.state.offset += self.state.limit;
        self.state.should_load = !complete && self.state.review_count < total_count;

        if !self.state.should_load && !complete {
            let count = self.state.review_count;
            self.state.rows.push(RowItem::Counter(CounterRow::new(count)));
            info!(count, total_count, "All reviews loaded, counter row appended");
        }
        self.state.is_loading = false;

        let end = self.state.rows.len();
        info!(
            appended = end - start,
            reviews = self.state.review_count,
            total_count,
            "Page merged"
        );
        if end > start {
            self.events.push(StoreEvent::ItemsInserted(start..end));
        }
        self.notify_state_changed();
    }

    /// Record a failed fetch. Rows are untouched and the next trigger may
    /// retry.
    pub fn fail_page(&mut self, error: &FetchError) {
        warn!(offset = self.state.offset, error = %error, "Review page fetch failed");
        self.state.should_load = true;
        self.state.is_loading = false;
        self.notify_state_changed();
    }

    /// Lift the truncation budget of the review row with `id`.
    ///
    /// Returns the row's index if it changed. Unknown ids and rows already
    /// expanded are ignored.
    pub fn expand_row(&mut self, id: RowId) -> Option<usize> {
        let index = self.index_of(id)?;
        let expanded = self.state.rows[index]
            .as_review_mut()
            .is_some_and(|review| review.expand());
        if !expanded {
            return None;
        }
        debug!(%id, index, "Row expanded");
        self.notify_state_changed();
        Some(index)
    }

    /// Drain queued notifications in emission order.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    fn notify_state_changed(&mut self) {
        let snapshot = self.state.snapshot();
        self.events.push(StoreEvent::StateChanged(snapshot));
    }
}

impl std::fmt::Debug for PaginationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationStore")
            .field("state", &self.state.snapshot())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
