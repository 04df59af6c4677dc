//! Binds the pagination store to a scrollable viewport.
//!
//! The controller owns the store, the layout engine and a [`HeightIndex`]
//! of row heights at the current width. It turns scroll positions into
//! page requests and taps into row expansion; everything else is left to
//! the store and the engine.

pub mod height_index;

pub use height_index::HeightIndex;

use crate::layout::{LayoutEngine, Point, Size, TextMetrics};
use crate::model::RowId;
use crate::pagination::{
    should_load_next_page, PaginationStore, StoreEvent, DEFAULT_THRESHOLD_SCREENS,
};
use crate::row::RowItem;
use std::time::Duration;
use tracing::debug;

/// A row intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow {
    pub index: usize,
    /// Top edge relative to the viewport top. Negative when the row is
    /// partly scrolled off.
    pub top: f64,
    pub height: f64,
}

/// Scroll state plus everything needed to turn it into rows.
#[derive(Debug)]
pub struct ListController<M> {
    store: PaginationStore,
    engine: LayoutEngine<M>,
    heights: HeightIndex,
    viewport: Size,
    scroll_offset: f64,
    prefetch_screens: f64,
}

impl<M: TextMetrics> ListController<M> {
    pub fn new(store: PaginationStore, engine: LayoutEngine<M>, viewport: Size) -> Self {
        let mut controller = Self {
            store,
            engine,
            heights: HeightIndex::default(),
            viewport,
            scroll_offset: 0.0,
            prefetch_screens: DEFAULT_THRESHOLD_SCREENS,
        };
        controller.measure_all();
        controller
    }

    pub fn with_prefetch_screens(mut self, screens: f64) -> Self {
        self.prefetch_screens = screens;
        self
    }

    pub fn store(&self) -> &PaginationStore {
        &self.store
    }

    pub fn engine(&self) -> &LayoutEngine<M> {
        &self.engine
    }

    pub fn heights(&self) -> &HeightIndex {
        &self.heights
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn content_height(&self) -> f64 {
        self.heights.total() as f64
    }

    pub fn is_loading(&self) -> bool {
        self.store.state().is_loading()
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport.height).max(0.0)
    }

    /// Request the first page. Returns whether a fetch was issued.
    pub fn start(&mut self) -> bool {
        let issued = self.store.request_next_page();
        self.drain_events();
        issued
    }

    /// Change the row width. Every row is re-measured.
    pub fn set_width(&mut self, width: f64) {
        self.set_viewport(Size::new(width, self.viewport.height));
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        let width_changed = viewport.width != self.viewport.width;
        self.viewport = viewport;
        if width_changed {
            debug!(width = viewport.width, rows = self.store.len(), "Re-measuring rows");
            self.measure_all();
        }
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// Apply arrived fetch completions. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        self.store.poll();
        self.settle()
    }

    /// Block up to `timeout` for one completion.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        self.store.wait(timeout);
        self.settle()
    }

    /// Scroll so the viewport top sits at `offset`, clamped to content.
    ///
    /// Requests the next page once the remaining content drops under the
    /// prefetch threshold. Returns whether a fetch was issued.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
        self.maybe_request_next_page()
    }

    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.scroll_to(self.scroll_offset + delta)
    }

    /// Handle a tap at `point`, in viewport coordinates.
    ///
    /// A tap inside a row's show-more affordance expands that row.
    pub fn tap(&mut self, point: Point) -> Option<RowId> {
        if point.y < 0.0 {
            return None;
        }
        let content_y = self.scroll_offset + point.y;
        let index = self.heights.row_at(content_y.floor() as usize)?;
        let row_top = self.heights.offset_of(index) as f64;
        let row = self.store.row(index)?;

        let show_more = self.engine.layout(row, self.viewport.width).show_more()?;
        if !show_more.contains(Point::new(point.x, content_y - row_top)) {
            return None;
        }
        let id = row.id()?;
        self.expand(id).then_some(id)
    }

    /// Expand the first visible row that shows the affordance.
    pub fn expand_first_visible(&mut self) -> Option<RowId> {
        let id = self.visible_rows().into_iter().find_map(|visible| {
            let row = self.store.row(visible.index)?;
            self.engine
                .layout(row, self.viewport.width)
                .show_more()
                .and(row.id())
        })?;
        self.expand(id).then_some(id)
    }

    /// Expand row `id` and re-measure it. Returns whether it changed.
    pub fn expand(&mut self, id: RowId) -> bool {
        let Some(index) = self.store.expand_row(id) else {
            return false;
        };
        if let Some(row) = self.store.row(index) {
            let height = self.measure(row);
            self.heights.set(index, height);
        }
        self.drain_events();
        true
    }

    /// Rows intersecting the viewport, top to bottom.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let Some(first) = self.heights.row_at(self.scroll_offset.floor() as usize) else {
            return Vec::new();
        };
        let bottom = self.scroll_offset + self.viewport.height;
        let mut rows = Vec::new();
        for index in first..self.heights.len() {
            let top = self.heights.offset_of(index) as f64;
            if top >= bottom {
                break;
            }
            let height = self.heights.height(index).unwrap_or(0) as f64;
            rows.push(VisibleRow {
                index,
                top: top - self.scroll_offset,
                height,
            });
        }
        rows
    }

    /// Row by index, for rendering.
    pub fn row(&self, index: usize) -> Option<&RowItem> {
        self.store.row(index)
    }

    fn settle(&mut self) -> bool {
        let changed = self.drain_events();
        if changed {
            self.maybe_request_next_page();
        }
        changed
    }

    fn maybe_request_next_page(&mut self) -> bool {
        let due = should_load_next_page(
            self.viewport.height,
            self.content_height(),
            self.scroll_offset,
            self.prefetch_screens,
        );
        let issued = due && self.store.request_next_page();
        self.drain_events();
        issued
    }

    /// Fold store notifications into the height index.
    fn drain_events(&mut self) -> bool {
        let events = self.store.take_events();
        let changed = !events.is_empty();
        for event in events {
            if let StoreEvent::ItemsInserted(range) = event {
                for index in range {
                    let height = self.store.row(index).map_or(0, |row| self.measure(row));
                    debug_assert_eq!(index, self.heights.len());
                    self.heights.push(height);
                }
            }
        }
        changed
    }

    fn measure_all(&mut self) {
        let heights: Vec<usize> = self
            .store
            .rows()
            .iter()
            .map(|row| self.measure(row))
            .collect();
        self.heights.reset(heights);
    }

    fn measure(&self, row: &RowItem) -> usize {
        let height = row.height(&self.engine, self.viewport.width);
        if height.is_finite() && height > 0.0 {
            height.ceil() as usize
        } else {
            0
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
