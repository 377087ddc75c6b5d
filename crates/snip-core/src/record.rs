use crate::error::{CoreError, Result};
use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A stored URL mapping.
///
/// Records are immutable once built; the constructor guarantees
/// `expires_at > created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    code: ShortCode,
    target_url: String,
    created_at: Timestamp,
    expires_at: Timestamp,
}

impl Record {
    /// Builds a record that lives from `created_at` until `expires_at`.
    pub fn new(
        code: ShortCode,
        target_url: impl Into<String>,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Self> {
        if expires_at <= created_at {
            return Err(CoreError::InvalidRecord(format!(
                "expiry {} must be after creation {}",
                expires_at, created_at
            )));
        }

        Ok(Self {
            code,
            target_url: target_url.into(),
            created_at,
            expires_at,
        })
    }

    /// Builds a record valid for `validity` starting at `created_at`.
    pub fn with_validity(
        code: ShortCode,
        target_url: impl Into<String>,
        created_at: Timestamp,
        validity: SignedDuration,
    ) -> Result<Self> {
        let expires_at = created_at.checked_add(validity).map_err(|e| {
            CoreError::InvalidRecord(format!("validity {} is out of range: {e}", validity))
        })?;
        Self::new(code, target_url, created_at, expires_at)
    }

    pub fn code(&self) -> &ShortCode {
        &self.code
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }
}
