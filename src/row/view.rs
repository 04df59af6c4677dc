//! Opaque render handle.
//!
//! Rows draw themselves through [`RowView`] so the row model never depends
//! on a concrete toolkit. Rects are row-local layout coordinates.

use crate::layout::Rect;
use crate::model::{RatingGlyph, StyledText};

/// What an image rect is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Avatar,
    Photo,
}

/// Drawing surface for one row.
pub trait RowView {
    /// Draw `text` inside `rect`, at most `max_lines` lines when given.
    fn draw_text(&mut self, rect: Rect, text: &StyledText, max_lines: Option<u32>);

    fn draw_rating(&mut self, rect: Rect, glyph: &RatingGlyph);

    /// `url` is `None` when the row has no image for this slot.
    fn draw_image(&mut self, rect: Rect, url: Option<&str>, slot: ImageSlot);

    fn draw_show_more(&mut self, rect: Rect, label: &StyledText);
}
