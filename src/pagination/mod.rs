//! Paging state machine.
//!
//! - `state`: the loaded rows plus cursor and flags
//! - `store`: every transition on that state
//! - `fetch`: the fetch collaborator and its completion
//! - `prefetch`: when scrolling should trigger the next page

pub mod fetch;
pub mod prefetch;
pub mod state;
pub mod store;

pub use fetch::{FetchCompletion, ReviewFetcher};
pub use prefetch::{should_load_next_page, DEFAULT_THRESHOLD_SCREENS};
pub use state::{PageState, StateSnapshot, DEFAULT_PAGE_SIZE};
pub use store::{PaginationStore, StoreEvent};
