//! Wire payload for review pages.
//!
//! The server contract is offset/limit paging with a reported total:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "first_name": "Anna",
//!       "last_name": "Ivanova",
//!       "rating": 5,
//!       "text": "Great fit.",
//!       "created": "13 May 2025",
//!       "avatar_url": "https://cdn.example.com/a.jpg",
//!       "photo_urls": ["https://cdn.example.com/p1.jpg"]
//!     }
//!   ],
//!   "count": 45
//! }
//! ```
//!
//! `avatar` and `photos` are accepted as aliases of `avatar_url` and
//! `photo_urls`.

use super::error::FetchError;
use serde::{Deserialize, Serialize};

/// One review record as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReviewPayload {
    /// Reviewer's first name.
    pub first_name: String,
    /// Reviewer's last name.
    pub last_name: String,
    /// Star rating, nominally 1..=5.
    pub rating: i64,
    /// Review body.
    pub text: String,
    /// Creation timestamp, preformatted by the server.
    pub created: String,
    /// Avatar image URL.
    #[serde(default, alias = "avatar")]
    pub avatar_url: Option<String>,
    /// Attached photo URLs.
    #[serde(default, alias = "photos")]
    pub photo_urls: Option<Vec<String>>,
}

impl ReviewPayload {
    /// Display name shown in the row header.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One page of reviews plus the server-reported total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewsPage {
    /// Records in server order.
    pub items: Vec<ReviewPayload>,
    /// Total number of reviews the server claims to have.
    #[serde(rename = "count")]
    pub total_count: usize,
}

/// Decode a page from raw bytes.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] for malformed JSON or missing fields.
pub fn decode_page(bytes: &[u8]) -> Result<ReviewsPage, FetchError> {
    Ok(serde_json::from_slice(bytes)?)
}
