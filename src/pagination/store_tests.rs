//! Tests for the pagination store.

use super::*;
use crate::model::ReviewPayload;
use crate::worker::{QueuedWorker, ThreadWorker};
use std::sync::Mutex;

/// Serves `limit` items per call (or a fixed count) against a fixed total.
struct PagedFetcher {
    total: Mutex<usize>,
    per_page: Option<usize>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<(usize, usize)>>,
}

impl PagedFetcher {
    fn new(total: usize) -> Self {
        Self {
            total: Mutex::new(total),
            per_page: None,
            failing: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn serving(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page);
        self
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn set_total(&self, total: usize) {
        *self.total.lock().unwrap() = total;
    }

    fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

fn payload(n: usize) -> ReviewPayload {
    ReviewPayload {
        first_name: "User".to_string(),
        last_name: n.to_string(),
        rating: 4,
        text: format!("Review number {n}"),
        created: "13 May".to_string(),
        avatar_url: None,
        photo_urls: None,
    }
}

impl ReviewFetcher for PagedFetcher {
    fn fetch(&self, offset: usize, limit: usize) -> Result<ReviewsPage, FetchError> {
        self.calls.lock().unwrap().push((offset, limit));
        if *self.failing.lock().unwrap() {
            return Err(FetchError::transport("connection reset"));
        }
        let count = self.per_page.unwrap_or(limit);
        Ok(ReviewsPage {
            items: (offset..offset + count).map(payload).collect(),
            total_count: *self.total.lock().unwrap(),
        })
    }
}

struct Harness {
    store: PaginationStore,
    worker: Arc<QueuedWorker>,
    fetcher: Arc<PagedFetcher>,
}

impl Harness {
    fn new(fetcher: PagedFetcher, limit: usize) -> Self {
        let fetcher = Arc::new(fetcher);
        let worker = Arc::new(QueuedWorker::new());
        let store = PaginationStore::new(
            fetcher.clone(),
            worker.clone(),
            RowBuilder::points(),
            limit,
        );
        Self {
            store,
            worker,
            fetcher,
        }
    }

    /// Request, let the worker answer, apply.
    fn load_page(&mut self) {
        assert!(self.store.request_next_page(), "fetch should be due");
        assert_eq!(self.worker.run_all(), 1);
        assert_eq!(self.store.poll(), 1);
    }

    fn review_rows(&self) -> usize {
        self.store.rows().iter().filter(|row| !row.is_counter()).count()
    }

    fn counter_rows(&self) -> Vec<CounterRow> {
        self.store
            .rows()
            .iter()
            .filter_map(|row| match row {
                RowItem::Counter(counter) => Some(*counter),
                RowItem::Review(_) => None,
            })
            .collect()
    }
}

// ===== Paging scenario =====

#[test]
fn forty_five_reviews_in_pages_of_twenty() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);

    h.load_page();
    assert_eq!(h.store.len(), 20);
    assert!(h.store.state().should_load());
    assert!(!h.store.state().has_counter());

    h.load_page();
    assert_eq!(h.store.len(), 40);
    assert!(h.store.state().should_load());

    // Server sends a full page of 20; only 5 remain.
    h.load_page();
    assert_eq!(h.review_rows(), 45);
    assert_eq!(h.store.len(), 46);
    assert!(h.store.rows()[45].is_counter());
    assert_eq!(h.counter_rows(), vec![CounterRow::new(45)]);
    assert!(!h.store.state().should_load());
    assert!(!h.store.state().is_loading());

    assert_eq!(h.fetcher.calls(), vec![(0, 20), (20, 20), (40, 20)]);
}

#[test]
fn no_requests_after_everything_loaded() {
    let mut h = Harness::new(PagedFetcher::new(5), 20);
    h.load_page();

    assert!(!h.store.request_next_page());
    assert_eq!(h.worker.pending(), 0);
    assert_eq!(h.counter_rows().len(), 1);
}

#[test]
fn offset_advances_by_limit_even_when_clamped() {
    let mut h = Harness::new(PagedFetcher::new(45).serving(3), 20);
    h.load_page();

    assert_eq!(h.store.state().offset(), 20);
    assert_eq!(h.store.len(), 3);
    h.load_page();
    assert_eq!(h.fetcher.calls()[1], (20, 20));
}

#[test]
fn oversized_page_is_clamped_to_total() {
    let mut h = Harness::new(PagedFetcher::new(7).serving(30), 20);
    h.load_page();

    assert_eq!(h.review_rows(), 7);
    assert_eq!(h.counter_rows(), vec![CounterRow::new(7)]);
}

#[test]
fn lowered_total_appends_nothing_and_closes_the_list() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.fetcher.set_total(10);
    h.load_page();

    assert_eq!(h.review_rows(), 20);
    assert!(!h.store.state().should_load());
    // The counter reports what is actually listed.
    assert_eq!(h.counter_rows(), vec![CounterRow::new(20)]);
}

#[test]
fn empty_result_set_gets_zero_counter() {
    let mut h = Harness::new(PagedFetcher::new(0), 20);
    h.load_page();

    assert_eq!(h.store.len(), 1);
    assert_eq!(h.counter_rows(), vec![CounterRow::new(0)]);
    assert_eq!(h.counter_rows()[0].label(), "0 отзывов");
}

#[test]
fn merged_page_after_counter_is_ignored() {
    let mut h = Harness::new(PagedFetcher::new(5), 20);
    h.load_page();
    let before = h.store.len();

    h.store.merge_page(ReviewsPage {
        items: (0..5).map(payload).collect(),
        total_count: 50,
    });

    assert_eq!(h.store.len(), before);
    assert_eq!(h.counter_rows().len(), 1);
    assert!(!h.store.state().should_load());
}

#[test]
fn row_ids_are_unique_across_pages() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    for _ in 0..3 {
        h.load_page();
    }
    let mut ids: Vec<_> = h.store.rows().iter().filter_map(RowItem::id).collect();
    let len = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), len);
}

#[test]
fn rows_keep_received_order() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.load_page();

    let names: Vec<_> = h
        .store
        .rows()
        .iter()
        .filter_map(RowItem::as_review)
        .map(|review| review.display_name().text().to_string())
        .collect();
    let expected: Vec<_> = (0..40).map(|n| format!("User {n}")).collect();
    assert_eq!(names, expected);
}

// ===== Single flight =====

#[test]
fn second_request_while_loading_is_ignored() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);

    assert!(h.store.request_next_page());
    assert!(!h.store.request_next_page());
    assert!(!h.store.request_next_page());

    assert_eq!(h.worker.pending(), 1);
    assert!(h.store.state().is_loading());
    assert!(!h.store.state().should_load());
}

#[test]
fn gate_reopens_after_completion() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.store.request_next_page();
    // Not applied yet: still gated.
    h.worker.run_all();
    assert!(!h.store.request_next_page());

    h.store.poll();
    assert!(h.store.request_next_page());
}

#[test]
fn poll_without_completions_is_a_no_op() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    assert_eq!(h.store.poll(), 0);
    assert!(h.store.take_events().is_empty());
}

// ===== Notifications =====

#[test]
fn request_emits_loading_snapshot() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.store.request_next_page();

    let events = h.store.take_events();
    assert_eq!(events.len(), 1);
    let StoreEvent::StateChanged(snapshot) = events[0].clone() else {
        panic!("expected StateChanged, got {events:?}");
    };
    assert!(snapshot.is_loading);
    assert!(!snapshot.should_load);
    assert_eq!(snapshot.row_count, 0);
}

#[test]
fn merge_emits_inserted_then_state_changed() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();

    let events = h.store.take_events();
    assert_eq!(events.len(), 3, "loading, inserted, changed: {events:?}");
    assert_eq!(events[1], StoreEvent::ItemsInserted(0..20));
    let StoreEvent::StateChanged(snapshot) = events[2] else {
        panic!("expected StateChanged");
    };
    // Snapshot agrees with the inserted rows.
    assert_eq!(snapshot.row_count, 20);
    assert!(!snapshot.is_loading);
    assert!(snapshot.should_load);
}

#[test]
fn final_insert_range_covers_counter_row() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.load_page();
    h.store.take_events();
    h.load_page();

    let events = h.store.take_events();
    assert!(events.contains(&StoreEvent::ItemsInserted(40..46)));
    let last = events.last().cloned();
    assert!(matches!(
        last,
        Some(StoreEvent::StateChanged(StateSnapshot {
            has_counter: true,
            row_count: 46,
            ..
        }))
    ));
}

#[test]
fn merge_without_new_rows_emits_only_state_changed() {
    let mut h = Harness::new(PagedFetcher::new(45).serving(0), 20);
    h.load_page();

    let events = h.store.take_events();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| matches!(event, StoreEvent::StateChanged(_))));
}

#[test]
fn no_snapshot_shows_both_flags_set() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    for _ in 0..3 {
        h.load_page();
    }
    for event in h.store.take_events() {
        if let StoreEvent::StateChanged(snapshot) = event {
            assert!(!(snapshot.is_loading && snapshot.should_load));
        }
    }
}

// ===== Failure =====

#[test]
fn failed_fetch_leaves_rows_and_permits_retry() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.store.take_events();

    h.fetcher.set_failing(true);
    h.load_page();
    assert_eq!(h.store.len(), 20);
    assert!(h.store.state().should_load());
    assert!(!h.store.state().is_loading());
    assert_eq!(h.store.state().offset(), 20);

    let events = h.store.take_events();
    assert!(!events
        .iter()
        .any(|event| matches!(event, StoreEvent::ItemsInserted(_))));

    h.fetcher.set_failing(false);
    h.load_page();
    assert_eq!(h.store.len(), 40);
    assert_eq!(h.fetcher.calls(), vec![(0, 20), (20, 20), (20, 20)]);
}

#[test]
fn decode_failure_is_treated_like_transport_failure() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.store.request_next_page();
    h.store.fail_page(&FetchError::decode("expected value at line 1"));

    assert!(h.store.state().should_load());
    assert!(!h.store.state().is_loading());
    assert!(h.store.is_empty());
}

// ===== Expansion =====

#[test]
fn expand_row_lifts_budget_once() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.store.take_events();
    let id = h.store.rows()[7].id().unwrap();

    assert_eq!(h.store.expand_row(id), Some(7));
    assert_eq!(h.store.rows()[7].as_review().unwrap().max_lines(), 0);
    assert_eq!(h.store.take_events().len(), 1);

    assert_eq!(h.store.expand_row(id), None);
    assert!(h.store.take_events().is_empty());
}

#[test]
fn expand_unknown_id_is_silent() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    h.store.take_events();

    let mut other_ids = crate::model::RowIdAllocator::new();
    let foreign = (0..100).map(|_| other_ids.allocate()).last().unwrap();
    assert_eq!(h.store.expand_row(foreign), None);
    assert!(h.store.take_events().is_empty());
}

#[test]
fn expand_keeps_other_rows_untouched() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    h.load_page();
    let before: Vec<_> = h.store.rows().to_vec();
    let id = before[3].id().unwrap();

    h.store.expand_row(id);
    for (index, (old, new)) in before.iter().zip(h.store.rows()).enumerate() {
        if index == 3 {
            assert_ne!(old, new);
            assert_eq!(old.id(), new.id());
        } else {
            assert_eq!(old, new);
        }
    }
}

// ===== Teardown and threads =====

#[test]
fn late_completion_after_teardown_is_discarded() {
    let h = Harness::new(PagedFetcher::new(45), 20);
    let Harness {
        mut store, worker, ..
    } = h;
    store.request_next_page();
    drop(store);

    // The job's send fails quietly.
    assert_eq!(worker.run_all(), 1);
}

#[test]
fn thread_worker_completion_is_applied_by_wait() {
    let fetcher = Arc::new(PagedFetcher::new(45));
    let mut store = PaginationStore::new(
        fetcher,
        Arc::new(ThreadWorker::default()),
        RowBuilder::cells(),
        20,
    );

    assert!(store.request_next_page());
    assert!(store.wait(Duration::from_secs(5)));
    assert_eq!(store.len(), 20);
    assert!(!store.state().is_loading());
}

#[test]
fn wait_times_out_without_a_fetch() {
    let mut h = Harness::new(PagedFetcher::new(45), 20);
    assert!(!h.store.wait(Duration::from_millis(10)));
}
