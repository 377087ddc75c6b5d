use thiserror::Error;

/// Result type for core constructors and validation.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors returned by [`Shortener::shorten`](crate::Shortener::shorten).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("short code is already taken: {0}")]
    CodeTaken(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("no free short code found after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

impl ShortenError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ShortenError::CodeTaken(_) => "code_taken",
            ShortenError::InvalidUrl(_) => "invalid_url",
            ShortenError::InvalidValidity(_) => "invalid_validity",
            ShortenError::InvalidShortCode(_) => "invalid_shortcode",
            ShortenError::GenerationExhausted { .. } => "generation_exhausted",
        }
    }
}

/// Errors returned by [`Resolver::resolve`](crate::Resolver::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code has expired: {0}")]
    Expired(String),
}

impl ResolveError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::NotFound(_) => "not_found",
            ResolveError::Expired(_) => "expired",
        }
    }
}
