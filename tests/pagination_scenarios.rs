//! End-to-end paging scenarios through the public API.
//!
//! A `QueuedWorker` keeps fetches deterministic: each test decides when the
//! background half of a fetch runs.

use revfeed::model::{FetchError, ReviewPayload, ReviewsPage};
use revfeed::pagination::{PaginationStore, ReviewFetcher, StoreEvent};
use revfeed::row::{RowBuilder, RowItem};
use revfeed::source::{FileFetcher, MemoryFetcher};
use revfeed::worker::{QueuedWorker, ThreadWorker};
use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn payload(n: usize) -> ReviewPayload {
    ReviewPayload {
        first_name: "Guest".to_string(),
        last_name: n.to_string(),
        rating: (n % 5 + 1) as i64,
        text: format!("Visit number {n} went fine"),
        created: "1 June".to_string(),
        avatar_url: None,
        photo_urls: None,
    }
}

fn reviews(count: usize) -> Vec<ReviewPayload> {
    (0..count).map(payload).collect()
}

fn store_over(fetcher: impl ReviewFetcher + 'static, limit: usize) -> (PaginationStore, Arc<QueuedWorker>) {
    let worker = Arc::new(QueuedWorker::new());
    let store = PaginationStore::new(Arc::new(fetcher), worker.clone(), RowBuilder::cells(), limit);
    (store, worker)
}

/// Request, run, and apply one page. Returns whether a request was issued.
fn step(store: &mut PaginationStore, worker: &QueuedWorker) -> bool {
    if !store.request_next_page() {
        return false;
    }
    worker.run_all();
    store.poll();
    true
}

fn counter_total(row: &RowItem) -> Option<usize> {
    match row {
        RowItem::Counter(counter) => Some(counter.total_count()),
        RowItem::Review(_) => None,
    }
}

#[test]
fn forty_five_reviews_in_pages_of_twenty() {
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(45)), 20);

    assert!(step(&mut store, &worker));
    assert_eq!(store.len(), 20);
    assert!(store.state().should_load());

    assert!(step(&mut store, &worker));
    assert_eq!(store.len(), 40);
    assert!(store.state().should_load());

    assert!(step(&mut store, &worker));
    assert_eq!(store.len(), 46, "45 reviews plus the counter row");
    assert!(!store.state().should_load());
    assert_eq!(counter_total(&store.rows()[45]), Some(45));

    assert!(!step(&mut store, &worker), "complete list never fetches again");
}

#[test]
fn exact_multiple_of_page_size_closes_on_the_last_full_page() {
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(40)), 20);

    assert!(step(&mut store, &worker));
    assert!(step(&mut store, &worker));

    assert_eq!(store.len(), 41);
    assert!(store.state().has_counter());
    assert!(!store.request_next_page());
}

#[test]
fn empty_feed_shows_only_the_counter() {
    let (mut store, worker) = store_over(MemoryFetcher::new(Vec::new()), 20);

    assert!(step(&mut store, &worker));

    assert_eq!(store.len(), 1);
    assert_eq!(counter_total(&store.rows()[0]), Some(0));
}

#[test]
fn overreporting_server_is_clamped_to_its_total() {
    // Claims 3 reviews but serves 5.
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(5)).with_reported_total(3), 20);

    assert!(step(&mut store, &worker));

    let reviews: Vec<_> = store.rows().iter().filter(|r| !r.is_counter()).collect();
    assert_eq!(reviews.len(), 3);
    assert_eq!(counter_total(store.rows().last().unwrap()), Some(3));
}

#[test]
fn events_announce_every_appended_range() {
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(25)), 10);
    let mut covered = Vec::new();

    while step(&mut store, &worker) {}

    for event in store.take_events() {
        if let StoreEvent::ItemsInserted(range) = event {
            covered.extend(range);
        }
    }
    assert_eq!(covered, (0..store.len()).collect::<Vec<_>>());
}

#[test]
fn no_snapshot_is_both_loading_and_eligible() {
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(30)), 7);

    while step(&mut store, &worker) {}

    for event in store.take_events() {
        if let StoreEvent::StateChanged(snapshot) = event {
            assert!(!(snapshot.is_loading && snapshot.should_load), "{snapshot:?}");
        }
    }
}

#[test]
fn row_ids_are_unique_across_pages() {
    let (mut store, worker) = store_over(MemoryFetcher::new(reviews(33)), 5);
    while step(&mut store, &worker) {}

    let ids: HashSet<_> = store.rows().iter().filter_map(RowItem::id).collect();
    assert_eq!(ids.len(), 33);
}

/// Fails its first call, then serves normally.
struct FlakyFetcher {
    inner: MemoryFetcher,
    failures_left: Mutex<usize>,
}

impl ReviewFetcher for FlakyFetcher {
    fn fetch(&self, offset: usize, limit: usize) -> Result<ReviewsPage, FetchError> {
        let mut left = self.failures_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err(FetchError::transport("network down"));
        }
        self.inner.fetch(offset, limit)
    }
}

#[test]
fn failed_page_is_retried_from_the_same_offset() {
    let fetcher = FlakyFetcher {
        inner: MemoryFetcher::new(reviews(12)),
        failures_left: Mutex::new(1),
    };
    let (mut store, worker) = store_over(fetcher, 10);

    assert!(step(&mut store, &worker));
    assert!(store.is_empty());
    assert!(!store.state().is_loading());
    assert_eq!(store.state().offset(), 0);

    assert!(step(&mut store, &worker));
    assert_eq!(store.len(), 10);
    assert!(step(&mut store, &worker));
    assert_eq!(store.len(), 13);
}

#[test]
fn file_fetcher_pages_through_a_document_on_a_thread() {
    let path = std::env::temp_dir().join(format!("revfeed_scenario_{}.json", std::process::id()));
    let document = ReviewsPage {
        items: reviews(7),
        total_count: 7,
    };
    fs::write(&path, serde_json::to_vec(&document).unwrap()).unwrap();

    let fetcher = FileFetcher::new(&path).unwrap();
    let mut store = PaginationStore::new(
        Arc::new(fetcher),
        Arc::new(ThreadWorker::default()),
        RowBuilder::cells(),
        4,
    );

    for _ in 0..2 {
        assert!(store.request_next_page());
        assert!(store.wait(Duration::from_secs(5)), "page should arrive");
    }
    fs::remove_file(&path).ok();

    assert_eq!(store.len(), 8);
    assert!(store.state().has_counter());
}
