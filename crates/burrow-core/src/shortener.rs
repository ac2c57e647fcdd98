use crate::link::Link;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a single URL, reusing the existing code if the URL was
    /// shortened before.
    async fn shorten(&self, original_url: &str) -> Result<Link>;

    /// Shortens a batch of URLs.
    ///
    /// Empty strings are skipped. Failures that only concern one URL
    /// (invalid URL, exhausted code generation) are logged and that URL is
    /// left out of the result. Storage failures abort the whole batch.
    async fn shorten_many(&self, original_urls: &[String]) -> Result<Vec<Link>>;

    /// Resolves a short code to its stored link.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<Link>>;

    /// Lists every stored link.
    async fn list(&self) -> Result<Vec<Link>>;

    /// Removes every stored link, returning how many were removed.
    async fn clear(&self) -> Result<u64>;
}
