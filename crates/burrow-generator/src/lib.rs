//! Short code generators.

pub mod random;
pub mod seq;

pub use random::{random_code, RandomGenerator};
pub use seq::SeqGenerator;

use burrow_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use burrow_core::{CoreError, ShortCode};

/// The 64 symbols short codes are drawn from.
pub const ALPHABET: &[u8; 64] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_-";

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage,
/// so they do not guarantee uniqueness. The store's primary key does, and
/// callers retry with a fresh code when an insert collides.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates the next candidate short code.
    fn generate(&self) -> Self::Output;
}

fn check_length(length: usize) -> Result<(), CoreError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(CoreError::InvalidShortCode(format!(
            "code length must be between {} and {}, got {}",
            MIN_LENGTH, MAX_LENGTH, length
        )));
    }
    Ok(())
}
