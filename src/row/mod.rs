//! Row model: the closed set of things a list row can show.
//!
//! [`RowItem`] has exactly two variants. Adding a third means revisiting
//! the layout engine and the pagination store's counter-row invariant.

mod builder;
mod view;

pub use builder::{RowBuilder, DEFAULT_MAX_LINES};
pub use view::{ImageSlot, RowView};

use crate::layout::{LayoutEngine, TextMetrics};
use crate::model::{reviews_label, RatingGlyph, RowId, StyledText};

/// One review.
///
/// Immutable apart from `max_lines`, which only [`ReviewRow::expand`]
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    id: RowId,
    display_name: StyledText,
    body: StyledText,
    timestamp: StyledText,
    rating: RatingGlyph,
    avatar_url: Option<String>,
    photo_urls: Vec<String>,
    max_lines: u32,
}

impl ReviewRow {
    /// Create a row with no media and the default truncation budget.
    pub fn new(
        id: RowId,
        display_name: StyledText,
        body: StyledText,
        timestamp: StyledText,
        rating: RatingGlyph,
    ) -> Self {
        Self {
            id,
            display_name,
            body,
            timestamp,
            rating,
            avatar_url: None,
            photo_urls: Vec::new(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_photos(mut self, urls: Vec<String>) -> Self {
        self.photo_urls = urls;
        self
    }

    /// Set the truncation budget. `0` means unlimited.
    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn display_name(&self) -> &StyledText {
        &self.display_name
    }

    pub fn body(&self) -> &StyledText {
        &self.body
    }

    pub fn timestamp(&self) -> &StyledText {
        &self.timestamp
    }

    pub fn rating(&self) -> &RatingGlyph {
        &self.rating
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn photo_urls(&self) -> &[String] {
        &self.photo_urls
    }

    pub fn max_lines(&self) -> u32 {
        self.max_lines
    }

    /// Whether the body is subject to a line budget.
    pub fn is_truncated(&self) -> bool {
        self.max_lines != 0
    }

    /// Height the body may occupy, or `None` when unlimited.
    pub fn allowed_body_height(&self) -> Option<f64> {
        self.is_truncated()
            .then(|| self.body.line_height() * self.max_lines as f64)
    }

    /// Lift the line budget. Returns `false` if it was already lifted.
    pub(crate) fn expand(&mut self) -> bool {
        if !self.is_truncated() {
            return false;
        }
        self.max_lines = 0;
        true
    }
}

/// Terminal row carrying the total review count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterRow {
    total_count: usize,
}

impl CounterRow {
    pub fn new(total_count: usize) -> Self {
        Self { total_count }
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Pluralized label, e.g. `"45 отзывов"`.
    pub fn label(&self) -> String {
        reviews_label(self.total_count)
    }
}

/// Identifies which recyclable view template renders a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReuseId {
    Review,
    Counter,
}

impl ReuseId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReuseId::Review => "ReviewRow",
            ReuseId::Counter => "CounterRow",
        }
    }
}

/// A list row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowItem {
    Review(ReviewRow),
    Counter(CounterRow),
}

impl RowItem {
    pub fn reuse_id(&self) -> ReuseId {
        match self {
            RowItem::Review(_) => ReuseId::Review,
            RowItem::Counter(_) => ReuseId::Counter,
        }
    }

    /// The single predicate for "is this the counter row".
    pub fn is_counter(&self) -> bool {
        matches!(self, RowItem::Counter(_))
    }

    pub fn as_review(&self) -> Option<&ReviewRow> {
        match self {
            RowItem::Review(review) => Some(review),
            RowItem::Counter(_) => None,
        }
    }

    pub(crate) fn as_review_mut(&mut self) -> Option<&mut ReviewRow> {
        match self {
            RowItem::Review(review) => Some(review),
            RowItem::Counter(_) => None,
        }
    }

    /// Id of a review row. Counter rows have none.
    pub fn id(&self) -> Option<RowId> {
        self.as_review().map(ReviewRow::id)
    }

    /// Height of this row at `width`.
    pub fn height<M: TextMetrics>(&self, engine: &LayoutEngine<M>, width: f64) -> f64 {
        engine.height(self, width)
    }

    /// Lay out at `width` and draw into `view`.
    pub fn render<M: TextMetrics>(&self, engine: &LayoutEngine<M>, width: f64, view: &mut dyn RowView) {
        match self {
            RowItem::Review(review) => {
                let layout = engine.layout_review(review, width);
                view.draw_image(layout.avatar, review.avatar_url(), ImageSlot::Avatar);
                view.draw_text(layout.name, review.display_name(), None);
                view.draw_rating(layout.rating, review.rating());
                for (rect, url) in layout.photos.iter().zip(review.photo_urls()) {
                    view.draw_image(*rect, Some(url), ImageSlot::Photo);
                }
                if !layout.body.is_empty() {
                    let max_lines = review.is_truncated().then_some(review.max_lines());
                    view.draw_text(layout.body, review.body(), max_lines);
                }
                if let Some(rect) = layout.show_more {
                    view.draw_show_more(rect, engine.show_more_text());
                }
                view.draw_text(layout.timestamp, review.timestamp(), None);
            }
            RowItem::Counter(counter) => {
                let layout = engine.layout_counter(counter, width);
                view.draw_text(layout.label, &layout.text, None);
            }
        }
    }
}

impl From<ReviewRow> for RowItem {
    fn from(review: ReviewRow) -> Self {
        RowItem::Review(review)
    }
}

impl From<CounterRow> for RowItem {
    fn from(counter: CounterRow) -> Self {
        RowItem::Counter(counter)
    }
}
