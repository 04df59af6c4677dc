//! Row geometry.
//!
//! Pure: nothing in here touches the terminal or the network.

pub mod engine;
pub mod geometry;
pub mod metrics;
pub mod params;

pub use engine::{CounterLayout, LayoutEngine, ReviewLayout, RowLayout, SHOW_MORE_LABEL};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use metrics::{columns_for, lines_for, wrap_text, MonospaceMetrics, TextMetrics};
pub use params::LayoutParams;
