//! Turns wire payloads into review rows.

use super::ReviewRow;
use crate::model::{
    clamp_rating, RatingRenderer, ReviewPayload, ReviewStyles, RowIdAllocator, StarRatingRenderer,
    TextRole,
};

/// Body lines shown before a review needs expanding.
pub const DEFAULT_MAX_LINES: u32 = 3;

/// Builds [`ReviewRow`]s with styled text, rating glyphs and fresh ids.
///
/// Owns the id allocator, so every row built by one builder has a
/// distinct id for the builder's lifetime.
pub struct RowBuilder {
    styles: ReviewStyles,
    ratings: Box<dyn RatingRenderer>,
    max_lines: u32,
    ids: RowIdAllocator,
}

impl RowBuilder {
    pub fn new(styles: ReviewStyles, ratings: Box<dyn RatingRenderer>) -> Self {
        Self {
            styles,
            ratings,
            max_lines: DEFAULT_MAX_LINES,
            ids: RowIdAllocator::new(),
        }
    }

    /// Point styles with 16pt stars.
    pub fn points() -> Self {
        Self::new(ReviewStyles::points(), Box::new(StarRatingRenderer::points()))
    }

    /// Cell styles with one-cell stars.
    pub fn cells() -> Self {
        Self::new(ReviewStyles::cells(), Box::new(StarRatingRenderer::cells()))
    }

    /// Override the initial truncation budget. `0` builds rows expanded.
    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn styles(&self) -> &ReviewStyles {
        &self.styles
    }

    pub fn build(&mut self, payload: ReviewPayload) -> ReviewRow {
        let glyph = self.ratings.rating_glyph(clamp_rating(payload.rating));
        let mut row = ReviewRow::new(
            self.ids.allocate(),
            self.styles.styled(payload.full_name(), TextRole::Username),
            self.styles.styled(payload.text, TextRole::Body),
            self.styles.styled(payload.created, TextRole::Created),
            glyph,
        )
        .with_max_lines(self.max_lines)
        .with_photos(payload.photo_urls.unwrap_or_default());

        if let Some(url) = payload.avatar_url {
            row = row.with_avatar(url);
        }
        row
    }
}

impl std::fmt::Debug for RowBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBuilder")
            .field("styles", &self.styles)
            .field("max_lines", &self.max_lines)
            .finish_non_exhaustive()
    }
}
