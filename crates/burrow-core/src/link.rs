use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to the URL it redirects to.
///
/// Links are created on the first shorten request for a URL, never
/// mutated, and only destroyed by a bulk clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The unique short code (primary key).
    pub short_code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
}

impl Link {
    pub fn new(short_code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
        }
    }
}
