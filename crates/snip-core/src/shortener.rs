use crate::error::{ResolveError, ShortenError};
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to be shortened.
    pub long_url: String,
    /// Optional caller-chosen code. Never replaced if already taken.
    pub custom_code: Option<String>,
    /// Minutes the mapping stays live. Falls back to the configured default.
    pub validity_minutes: Option<i64>,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            custom_code: None,
            validity_minutes: None,
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }

    pub fn with_validity_minutes(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }
}

/// The outcome of a successful shorten call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortened {
    pub code: ShortCode,
    pub expires_at: Timestamp,
}

/// A live mapping returned by a resolve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub long_url: String,
    pub expires_at: Timestamp,
}

pub trait Shortener: Send + Sync + 'static {
    /// Allocates a code for the URL and stores the mapping.
    fn shorten(&self, request: ShortenRequest) -> Result<Shortened, ShortenError>;
}

pub trait Resolver: Send + Sync + 'static {
    /// Resolves a short code to its live target URL.
    fn resolve(&self, code: &str) -> Result<Resolved, ResolveError>;
}
