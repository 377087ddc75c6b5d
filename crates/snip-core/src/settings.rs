use crate::error::{CoreError, Result};
use crate::shortcode::{ShortCode, MAX_LENGTH};
use std::collections::HashSet;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Digits plus upper and lower case ASCII letters.
pub const DEFAULT_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_MAX_GENERATION_RETRIES: u32 = 10;

/// Tunables for code generation, expiry and reaping.
///
/// ```
/// use snip_core::Settings;
///
/// let settings = Settings::builder().code_length(8).build();
/// assert_eq!(settings.default_validity_minutes, 30);
/// settings.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct Settings {
    /// Length of generated codes.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// Symbols generated codes are drawn from.
    #[builder(default = DEFAULT_ALPHABET.to_string(), setter(into))]
    pub code_alphabet: String,
    /// Validity applied when a shorten request does not carry one.
    #[builder(default = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: i64,
    /// Seconds between two reaper cycles.
    #[builder(default = DEFAULT_REAP_INTERVAL_SECS)]
    pub reap_interval_secs: u64,
    /// Generation attempts before giving up with `generation_exhausted`.
    #[builder(default = DEFAULT_MAX_GENERATION_RETRIES)]
    pub max_generation_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Settings {
    /// Checks every option, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > MAX_LENGTH {
            return Err(CoreError::InvalidSettings(format!(
                "code length must be between 1 and {}, got {}",
                MAX_LENGTH, self.code_length
            )));
        }

        if self.code_alphabet.is_empty() {
            return Err(CoreError::InvalidSettings(
                "code alphabet cannot be empty".to_string(),
            ));
        }

        if let Some(c) = self
            .code_alphabet
            .chars()
            .find(|c| !ShortCode::is_allowed_char(*c))
        {
            return Err(CoreError::InvalidSettings(format!(
                "code alphabet contains a character that is not URL safe: '{}'",
                c
            )));
        }

        let unique: HashSet<char> = self.code_alphabet.chars().collect();
        if unique.len() != self.code_alphabet.len() {
            return Err(CoreError::InvalidSettings(
                "code alphabet contains duplicate characters".to_string(),
            ));
        }

        if self.default_validity_minutes <= 0 {
            return Err(CoreError::InvalidSettings(format!(
                "default validity must be positive, got {}",
                self.default_validity_minutes
            )));
        }

        if self.reap_interval_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "reap interval must be positive".to_string(),
            ));
        }

        if self.max_generation_retries == 0 {
            return Err(CoreError::InvalidSettings(
                "max generation retries must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }
}
