use crate::Generator;
use snip_core::settings::{DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH};
use snip_core::{CoreError, Settings, ShortCode};

/// Draws every character of a code uniformly from a fixed alphabet.
///
/// Holds no mutable state, so one instance can be shared by any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl RandomGenerator {
    pub fn new(alphabet: &str, length: usize) -> Result<Self, CoreError> {
        if alphabet.is_empty() {
            return Err(CoreError::InvalidSettings(
                "code alphabet cannot be empty".to_string(),
            ));
        }
        if length == 0 {
            return Err(CoreError::InvalidSettings(
                "code length must be positive".to_string(),
            ));
        }

        Ok(Self {
            alphabet: alphabet.chars().collect(),
            length,
        })
    }

    /// Builds a generator from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Self::new(&settings.code_alphabet, settings.code_length)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct codes this generator can produce.
    pub fn keyspace(&self) -> Option<u128> {
        (self.alphabet.len() as u128).checked_pow(self.length as u32)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let code: String = (0..self.length)
            .map(|_| self.alphabet[rand::random_range(0..self.alphabet.len())])
            .collect();
        ShortCode::new_unchecked(code)
    }
}
