//! Row layout engine.
//!
//! Pure function from (row, width) to the rectangle of every sub-element
//! plus the row height. Nothing is cached: every call measures afresh, so a
//! width change needs no invalidation and calls are safe to run
//! concurrently for different rows.
//!
//! # Review row flow
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ [avatar] name                            │  insets.top
//! │          ★★★★☆                           │  name_to_rating
//! │ [photo][photo][photo]                    │  rating_to_photos / photos_to_text
//! │ body text, at most max_lines             │  (rating_to_text when no photos)
//! │          Show more...                    │  text_to_created / show_more_to_created
//! │          timestamp                       │  insets.bottom
//! └──────────────────────────────────────────┘
//! ```
//!
//! Name, rating, affordance and timestamp sit in the column right of the
//! avatar. The photo strip and body drop below the avatar and span the full
//! content width from the leading inset. The capped and unconstrained body
//! measurements use that same width, so whatever the budget hides is always
//! signalled by the affordance.

use super::geometry::{Point, Rect, Size};
use super::metrics::TextMetrics;
use super::params::LayoutParams;
use crate::model::{ReviewStyles, StyledText, TextRole};
use crate::row::{CounterRow, ReviewRow, RowItem};

/// Label of the expand affordance.
pub const SHOW_MORE_LABEL: &str = "Показать полностью...";

/// Geometry of a review row, in row-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLayout {
    pub avatar: Rect,
    pub name: Rect,
    pub rating: Rect,
    /// Present only when the row has photos.
    pub photo_strip: Option<Rect>,
    /// One rect per photo that fits in the strip, in order.
    pub photos: Vec<Rect>,
    /// Zero-sized when the body is empty.
    pub body: Rect,
    /// Present only when the body is truncated and overflows its budget.
    pub show_more: Option<Rect>,
    pub timestamp: Rect,
    pub height: f64,
}

/// Geometry of the counter row.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterLayout {
    /// Centered label rect.
    pub label: Rect,
    /// Styled label text.
    pub text: StyledText,
    pub height: f64,
}

/// Layout of either row variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RowLayout {
    Review(ReviewLayout),
    Counter(CounterLayout),
}

impl RowLayout {
    pub fn height(&self) -> f64 {
        match self {
            RowLayout::Review(layout) => layout.height,
            RowLayout::Counter(layout) => layout.height,
        }
    }

    /// The expand affordance, if shown.
    pub fn show_more(&self) -> Option<Rect> {
        match self {
            RowLayout::Review(layout) => layout.show_more,
            RowLayout::Counter(_) => None,
        }
    }
}

/// Computes row geometry.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M> {
    metrics: M,
    params: LayoutParams,
    styles: ReviewStyles,
    show_more: StyledText,
    show_more_size: Size,
}

impl<M: TextMetrics> LayoutEngine<M> {
    pub fn new(metrics: M, params: LayoutParams, styles: ReviewStyles) -> Self {
        let show_more = styles.styled(SHOW_MORE_LABEL, TextRole::ShowMore);
        let show_more_size = metrics.measure(&show_more, f64::INFINITY, None);
        Self {
            metrics,
            params,
            styles,
            show_more,
            show_more_size,
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn show_more_text(&self) -> &StyledText {
        &self.show_more
    }

    pub fn layout(&self, row: &RowItem, width: f64) -> RowLayout {
        match row {
            RowItem::Review(review) => RowLayout::Review(self.layout_review(review, width)),
            RowItem::Counter(counter) => RowLayout::Counter(self.layout_counter(counter, width)),
        }
    }

    pub fn height(&self, row: &RowItem, width: f64) -> f64 {
        match row {
            RowItem::Review(review) => self.layout_review(review, width).height,
            RowItem::Counter(_) => self.params.counter_height,
        }
    }

    pub fn layout_review(&self, row: &ReviewRow, width: f64) -> ReviewLayout {
        let p = &self.params;
        let content_width = p.content_width(width);
        let column_x = p.column_x();
        let column_width = p.column_width(width);

        let mut y = p.insets.top;

        let avatar = Rect::from_origin_size(Point::new(p.insets.left, y), p.avatar_size);

        let name_size = self.metrics.measure(row.display_name(), column_width, None);
        let name = Rect::from_origin_size(Point::new(column_x, y), name_size);
        y = name.max_y() + p.name_to_rating;

        let glyph = row.rating();
        let rating = Rect::new(column_x, y, glyph.width, glyph.height);
        y = rating.max_y();

        let (photo_strip, photos) = if row.photo_urls().is_empty() {
            y += p.rating_to_text;
            (None, Vec::new())
        } else {
            y += p.rating_to_photos;
            let strip = Rect::new(p.insets.left, y, content_width, p.photo_size.height);
            y = strip.max_y() + p.photos_to_text;
            (Some(strip), self.photo_rects(strip, row.photo_urls().len()))
        };

        let mut body = Rect::ZERO;
        let mut show_more = None;
        if !row.body().is_empty() {
            let allowed = row.allowed_body_height();
            let unconstrained = self.metrics.measure(row.body(), content_width, None).height;
            let overflows = allowed.is_some_and(|allowed| unconstrained > allowed);

            let shown = self.metrics.measure(row.body(), content_width, allowed);
            body = Rect::from_origin_size(Point::new(p.insets.left, y), shown);
            y = body.max_y() + p.text_to_created;

            if overflows {
                let rect = Rect::from_origin_size(Point::new(column_x, y), self.show_more_size);
                y = rect.max_y() + p.show_more_to_created;
                show_more = Some(rect);
            }
        }

        let timestamp_size = self.metrics.measure(row.timestamp(), content_width, None);
        let timestamp = Rect::from_origin_size(Point::new(column_x, y), timestamp_size);

        ReviewLayout {
            avatar,
            name,
            rating,
            photo_strip,
            photos,
            body,
            show_more,
            timestamp,
            height: timestamp.max_y() + p.insets.bottom,
        }
    }

    pub fn layout_counter(&self, counter: &CounterRow, width: f64) -> CounterLayout {
        let height = self.params.counter_height;
        let text = self.styles.styled(counter.label(), TextRole::Counter);
        let size = self.metrics.measure(&text, width, None);
        let label = Rect::new(
            ((width - size.width) / 2.0).max(0.0),
            ((height - size.height) / 2.0).max(0.0),
            size.width.min(width.max(0.0)),
            size.height,
        );
        CounterLayout {
            label,
            text,
            height,
        }
    }

    /// Photos laid left to right; those that would cross the strip's
    /// trailing edge are scrolled out and get no rect.
    fn photo_rects(&self, strip: Rect, count: usize) -> Vec<Rect> {
        let p = &self.params;
        let step = p.photo_size.width + p.photo_spacing;
        (0..count)
            .map(|i| {
                Rect::from_origin_size(
                    Point::new(strip.min_x() + step * i as f64, strip.min_y()),
                    p.photo_size,
                )
            })
            .take_while(|rect| rect.max_x() <= strip.max_x())
            .collect()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
