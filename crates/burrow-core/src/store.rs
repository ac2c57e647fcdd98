use crate::error::StorageError;
use crate::link::Link;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link store.
///
/// Lookups are exact matches. A miss is reported as `Ok(None)`, never as an
/// error.
#[async_trait]
pub trait ReadLinkStore: Send + Sync + 'static {
    /// Retrieves the link stored under `code`.
    async fn get_by_short_code(&self, code: &ShortCode) -> Result<Option<Link>>;

    /// Retrieves the link whose original URL is exactly `url`.
    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>>;

    /// Returns every stored link in insertion order.
    async fn get_all(&self) -> Result<Vec<Link>>;
}

#[async_trait]
pub trait LinkStore: ReadLinkStore {
    /// Inserts a new link.
    ///
    /// Returns `Err(DuplicateKey)` if the short code is taken and
    /// `Err(DuplicateUrl)` if the original URL is already stored. Both checks
    /// happen atomically with the insert.
    async fn save(&self, link: &Link) -> Result<()>;

    /// Deletes every stored link and returns how many were removed.
    async fn clear_all(&self) -> Result<u64>;
}
