use std::sync::Arc;

use axum::http::{header, HeaderMap};
use burrow_core::{ShortCode, Shortener};

/// Base used for short URLs when neither a public base URL nor a `Host`
/// header is available.
pub const FALLBACK_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Option<String>,
}

impl AppState {
    /// Creates state whose short URLs are built from the request's `Host`
    /// header.
    pub fn new(shortener: Arc<dyn Shortener>) -> Self {
        Self {
            shortener,
            base_url: None,
        }
    }

    /// Creates state whose short URLs always start with `public_base_url`.
    ///
    /// A blank base is ignored and the `Host` header is used instead.
    pub fn with_base_url(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        let base_url = public_base_url.into().trim().to_string();
        Self {
            shortener,
            base_url: Some(base_url).filter(|base| !base.is_empty()),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &ShortCode, headers: &HeaderMap) -> String {
        match &self.base_url {
            Some(base) => code.to_url(base),
            None => {
                let host = headers
                    .get(header::HOST)
                    .and_then(|value| value.to_str().ok())
                    .filter(|host| !host.is_empty());
                match host {
                    Some(host) => code.to_url(&format!("http://{host}")),
                    None => code.to_url(FALLBACK_BASE_URL),
                }
            }
        }
    }
}
