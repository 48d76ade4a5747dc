// Random alphanumeric short code generation
// Collision handling lives in the link registry, not here.

use rand::{thread_rng, Rng};
use thiserror::Error;

// =============================================================================
// CONSTANTS
// =============================================================================

/// A-Z, a-z, 0-9
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Width of the `links.short_code` column
pub const MAX_CODE_LENGTH: usize = 16;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug, PartialEq)]
pub enum ShortCodeError {
    #[error("Invalid code length: {0}. Length must be between 1 and 16")]
    InvalidLength(usize),
}

// =============================================================================
// SHORT CODE GENERATOR
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ShortCodeGenerator {
    length: usize,
}

impl Default for ShortCodeGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl ShortCodeGenerator {
    pub fn new(length: usize) -> Result<Self, ShortCodeError> {
        if length == 0 || length > MAX_CODE_LENGTH {
            return Err(ShortCodeError::InvalidLength(length));
        }
        Ok(Self { length })
    }

    /// Draw a fresh code of the configured length
    pub fn generate(&self) -> String {
        generate_code(self.length)
    }
}

/// Anything that can hand out candidate short codes
pub trait CodeSource: Send + Sync {
    fn next_code(&self) -> String;
}

impl CodeSource for ShortCodeGenerator {
    fn next_code(&self) -> String {
        self.generate()
    }
}

/// Each character is drawn uniformly and independently from `ALPHABET`.
/// Callers validate `length`; zero yields an empty string.
pub fn generate_code(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
