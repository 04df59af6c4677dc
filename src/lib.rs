//! revfeed
//!
//! An incrementally paged, variable-height review feed.
//!
//! The core is three pieces that never touch a terminal:
//!
//! - [`pagination`]: the page cursor, single-flight fetch gate, and merge of
//!   pages into an ordered row list closed by a counter row
//! - [`layout`]: deterministic per-row geometry for review and counter rows
//! - [`controller`]: scroll offset, cumulative row heights, hit testing, and
//!   the prefetch trigger tying the two together
//!
//! [`view`] is the impure shell that drives the core from crossterm events
//! and draws it with ratatui.

pub mod config;
pub mod controller;
pub mod image;
pub mod layout;
pub mod logging;
pub mod model;
pub mod pagination;
pub mod row;
pub mod source;
pub mod view;
pub mod worker;
