use crate::{check_length, Generator, ALPHABET};
use burrow_core::{CoreError, ShortCode};
use std::sync::atomic::{AtomicU64, Ordering};

/// A short code generator using a sequential counter.
///
/// The counter is rendered as a fixed-width base-64 number over
/// [`ALPHABET`], so the codes look like "aaaaaa", "aaaaab", ... Codes are
/// unique within one instance until the counter wraps at `64^length`.
///
/// Two instances writing to the same store will produce the same codes;
/// give each a distinct offset (e.g. node 1 starts at 0, node 2 at
/// 1_000_000) or rely on the store's collision retry.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    length: usize,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            length: self.length,
        }
    }
}

impl SeqGenerator {
    /// Creates a sequential generator starting at zero.
    pub fn new(length: usize) -> Result<Self, CoreError> {
        Self::with_offset(length, 0)
    }

    /// Creates a sequential generator starting from a specific counter value.
    pub fn with_offset(length: usize, offset: u64) -> Result<Self, CoreError> {
        check_length(length)?;
        Ok(Self {
            counter: AtomicU64::new(offset),
            length,
        })
    }

    fn encode(&self, mut value: u64) -> String {
        let base = ALPHABET.len() as u64;
        let mut digits = vec![ALPHABET[0]; self.length];
        for slot in digits.iter_mut().rev() {
            *slot = ALPHABET[(value % base) as usize];
            value /= base;
        }
        // ALPHABET is ASCII.
        digits.into_iter().map(char::from).collect()
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(self.encode(count))
    }
}
