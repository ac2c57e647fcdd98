use async_trait::async_trait;
use burrow_core::{Link, LinkStore, ShortCode, Shortener, ShortenerError, StorageError};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Default number of codes tried before giving up on a URL.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many generated codes to try per URL before reporting
    /// [`ShortenerError::GenerationExhausted`].
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`LinkStore`] and a [`Generator`] to handle:
/// - Idempotent shortening (an already shortened URL keeps its code)
/// - Regenerating the code when an insert collides, up to
///   `max_attempts` times
/// - URL validation
///
/// The check-then-insert sequence is not locked. The store's uniqueness
/// constraints reject the loser of a race, which then reads back the
/// winner's link.
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<S: LinkStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_settings(store, generator, ShortenerSettings::default())
    }

    pub fn with_settings(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates that the URL has a valid format (has a scheme and host).
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        // Stored URLs end up verbatim in the Location header.
        if url.chars().any(|c| c.is_ascii_control() || c.is_whitespace()) {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must not contain whitespace or control characters: {:?}",
                url
            )));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };

        if rest.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    fn generate_code(&self) -> ShortCode {
        self.generator.generate().into()
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, original_url: &str) -> Result<Link, ShortenerError> {
        Self::validate_url(original_url)?;

        if let Some(existing) = self.store.get_by_original_url(original_url).await? {
            debug!(code = %existing.short_code, url = original_url, "reusing existing short code");
            return Ok(existing);
        }

        let attempts = self.settings.max_attempts;
        for attempt in 1..=attempts {
            let code = self.generate_code();
            if code.is_reserved() {
                warn!(code = %code, attempt, "generated a reserved short code, regenerating");
                continue;
            }
            let link = Link::new(code, original_url);

            match self.store.save(&link).await {
                Ok(()) => {
                    info!(code = %link.short_code, url = original_url, "shortened url");
                    return Ok(link);
                }
                Err(StorageError::DuplicateKey(code)) => {
                    warn!(code = %code, attempt, "short code collision, regenerating");
                }
                Err(StorageError::DuplicateUrl(_)) => {
                    // A concurrent request stored this URL first.
                    if let Some(winner) = self.store.get_by_original_url(original_url).await? {
                        debug!(code = %winner.short_code, url = original_url, "lost shorten race, reusing winner");
                        return Ok(winner);
                    }
                    // Cleared in between; the next attempt starts over.
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ShortenerError::GenerationExhausted {
            url: original_url.to_string(),
            attempts,
        })
    }

    async fn shorten_many(&self, original_urls: &[String]) -> Result<Vec<Link>, ShortenerError> {
        let mut links = Vec::with_capacity(original_urls.len());

        for url in original_urls {
            if url.is_empty() {
                continue;
            }

            match self.shorten(url).await {
                Ok(link) => links.push(link),
                Err(err) if err.is_per_url() => {
                    warn!(url = %url, error = %err, "skipping url");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(links)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<Link>, ShortenerError> {
        Ok(self.store.get_by_short_code(code).await?)
    }

    async fn list(&self) -> Result<Vec<Link>, ShortenerError> {
        Ok(self.store.get_all().await?)
    }

    async fn clear(&self) -> Result<u64, ShortenerError> {
        let removed = self.store.clear_all().await?;
        info!(removed, "cleared all links");
        Ok(removed)
    }
}
