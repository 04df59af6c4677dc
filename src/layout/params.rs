//! Layout constants for review and counter rows.
//!
//! Every spacing the engine uses lives here so a preset fully determines
//! geometry. Two spacings after the rating look alike but are not
//! interchangeable: `rating_to_photos` applies when a photo strip follows,
//! `rating_to_text` when it does not.

use super::geometry::{EdgeInsets, Size};

/// Global parameters that affect row layout.
///
/// # Equality Semantics
/// Two `LayoutParams` are equal if they would produce identical layouts
/// for identical rows and widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Row edges to content.
    pub insets: EdgeInsets,
    /// Avatar square at the leading edge.
    pub avatar_size: Size,
    /// Horizontal gap between avatar and the name column.
    pub avatar_to_name: f64,
    /// Vertical gap from name to rating.
    pub name_to_rating: f64,
    /// Vertical gap from rating to body text when there are no photos.
    pub rating_to_text: f64,
    /// Vertical gap from rating to the photo strip.
    pub rating_to_photos: f64,
    /// Size of one photo in the strip.
    pub photo_size: Size,
    /// Horizontal gap between photos.
    pub photo_spacing: f64,
    /// Vertical gap from the photo strip to body text.
    pub photos_to_text: f64,
    /// Vertical gap below body text.
    pub text_to_created: f64,
    /// Vertical gap below the "show more" affordance.
    pub show_more_to_created: f64,
    /// Fixed height of the counter row.
    pub counter_height: f64,
}

impl LayoutParams {
    /// Point-based constants for pixel displays.
    pub fn points() -> Self {
        Self {
            insets: EdgeInsets::new(9.0, 12.0, 9.0, 12.0),
            avatar_size: Size::new(36.0, 36.0),
            avatar_to_name: 10.0,
            name_to_rating: 6.0,
            rating_to_text: 6.0,
            rating_to_photos: 10.0,
            photo_size: Size::new(55.0, 66.0),
            photo_spacing: 8.0,
            photos_to_text: 10.0,
            text_to_created: 6.0,
            show_more_to_created: 6.0,
            counter_height: 44.0,
        }
    }

    /// Cell-based constants for terminal rendering.
    pub fn cells() -> Self {
        Self {
            insets: EdgeInsets::new(1.0, 1.0, 1.0, 1.0),
            avatar_size: Size::new(4.0, 2.0),
            avatar_to_name: 1.0,
            name_to_rating: 0.0,
            rating_to_text: 1.0,
            rating_to_photos: 1.0,
            photo_size: Size::new(6.0, 3.0),
            photo_spacing: 1.0,
            photos_to_text: 1.0,
            text_to_created: 0.0,
            show_more_to_created: 0.0,
            counter_height: 3.0,
        }
    }

    /// X of the column shared by name, rating, photos, body and timestamp.
    pub fn column_x(&self) -> f64 {
        self.insets.left + self.avatar_size.width + self.avatar_to_name
    }

    /// Width available inside the insets.
    pub fn content_width(&self, row_width: f64) -> f64 {
        (row_width - self.insets.horizontal()).max(0.0)
    }

    /// Width available to the right of the avatar.
    pub fn column_width(&self, row_width: f64) -> f64 {
        (self.content_width(row_width) - self.avatar_size.width - self.avatar_to_name).max(0.0)
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::points()
    }
}
