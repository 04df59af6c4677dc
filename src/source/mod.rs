//! Review fetchers.
//!
//! - `file`: a JSON document on disk served page by page
//! - `memory`: an in-process list, for headless drivers and tests

pub mod file;
pub mod memory;

pub use file::FileFetcher;
pub use memory::MemoryFetcher;
