use thiserror::Error;

/// Errors related to the core types of the URL shortener.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Failures reported by a [`LinkStore`][crate::store::LinkStore].
///
/// A lookup miss is not an error; stores return `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    DuplicateKey(String),
    #[error("original url already shortened: {0}")]
    DuplicateUrl(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Returns `true` for uniqueness violations, which callers may recover from.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey(_) | Self::DuplicateUrl(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("could not generate a unique short code for {url} after {attempts} attempts")]
    GenerationExhausted { url: String, attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ShortenerError {
    /// Returns `true` if the failure only concerns a single URL of a batch.
    pub fn is_per_url(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::GenerationExhausted { .. })
    }
}
