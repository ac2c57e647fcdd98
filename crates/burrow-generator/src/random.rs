use crate::{check_length, Generator, ALPHABET, DEFAULT_CODE_LENGTH};
use burrow_core::{CoreError, ShortCode};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `length` symbols uniformly at random from [`ALPHABET`].
pub fn random_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates fixed-length random codes.
///
/// The RNG is seeded once from the operating system when the generator is
/// built and shared by every caller.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Result<Self, CoreError> {
        check_length(length)?;
        Ok(Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            length,
        })
    }

    /// Creates a generator with a fixed seed, producing a reproducible stream.
    pub fn with_seed(length: usize, seed: u64) -> Result<Self, CoreError> {
        check_length(length)?;
        Ok(Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = random_code(&mut *self.rng.lock(), self.length);
        ShortCode::new_unchecked(code)
    }
}
