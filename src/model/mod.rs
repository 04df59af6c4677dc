//! Domain model types (pure).
//!
//! Everything here is plain data plus small pure helpers; no I/O.

pub mod error;
pub mod identifiers;
pub mod plural;
pub mod rating;
pub mod review;
pub mod styled;

// Re-export for convenience
pub use error::{AppError, FetchError, InputError};
pub use identifiers::{RowId, RowIdAllocator};
pub use plural::{reviews_label, PluralForm};
pub use rating::{clamp_rating, RatingGlyph, RatingRenderer, StarDrawable, StarRatingRenderer};
pub use review::{decode_page, ReviewPayload, ReviewsPage};
pub use styled::{FontMetrics, ReviewStyles, StyledText, TextRole, TextStyle};
