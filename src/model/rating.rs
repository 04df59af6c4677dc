//! Rating glyphs.
//!
//! A [`RatingRenderer`] turns an integer rating into a precomputed glyph
//! with a natural size. The layout engine places it; renderers draw it.

/// Drawable half of a rating glyph: filled stars out of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarDrawable {
    pub filled: u8,
    pub total: u8,
}

impl StarDrawable {
    /// Text rendering, one character per star.
    pub fn to_text(&self) -> String {
        let filled = self.filled.min(self.total) as usize;
        let empty = self.total as usize - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// Precomputed rating visual with its natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingGlyph {
    pub width: f64,
    pub height: f64,
    pub drawable: StarDrawable,
}

/// Produces rating glyphs for ratings in `1..=5`.
pub trait RatingRenderer: Send + Sync {
    fn rating_glyph(&self, rating: u8) -> RatingGlyph;
}

/// Highest representable rating.
pub const MAX_RATING: u8 = 5;

/// Clamp a wire rating into `1..=MAX_RATING`.
pub fn clamp_rating(raw: i64) -> u8 {
    raw.clamp(1, MAX_RATING as i64) as u8
}

/// Row of equally sized stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRatingRenderer {
    star_size: f64,
    spacing: f64,
}

impl StarRatingRenderer {
    pub fn new(star_size: f64, spacing: f64) -> Self {
        Self { star_size, spacing }
    }

    /// 16pt stars, 1pt apart.
    pub fn points() -> Self {
        Self::new(16.0, 1.0)
    }

    /// One cell per star.
    pub fn cells() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl Default for StarRatingRenderer {
    fn default() -> Self {
        Self::points()
    }
}

impl RatingRenderer for StarRatingRenderer {
    fn rating_glyph(&self, rating: u8) -> RatingGlyph {
        let total = MAX_RATING as f64;
        RatingGlyph {
            width: self.star_size * total + self.spacing * (total - 1.0),
            height: self.star_size,
            drawable: StarDrawable {
                filled: rating.clamp(1, MAX_RATING),
                total: MAX_RATING,
            },
        }
    }
}
