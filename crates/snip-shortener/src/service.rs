use jiff::{SignedDuration, Timestamp};
use snip_core::{
    is_expired, Clock, CoreError, Event, EventSink, Record, Settings, ShortCode, ShortenError,
    ShortenRequest, Shortened, Shortener, TracingEventSink,
};
use snip_generator::Generator;
use snip_storage::{MappingStore, StorageError};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use url::Url;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `MappingStore` and a `Generator` to handle:
/// - URL and validity validation
/// - Caller-supplied codes, which are never replaced or retried
/// - Generated codes, retried on collision up to the configured budget
///
/// A code whose record has expired but has not been reaped yet is reclaimed
/// on the spot rather than reported as taken.
pub struct ShortenService<S, G, C> {
    store: Arc<S>,
    generator: G,
    clock: C,
    settings: Settings,
    events: Arc<dyn EventSink>,
}

impl<S: MappingStore, G: Generator, C: Clock> ShortenService<S, G, C> {
    /// Creates the service, rejecting settings that fail [`Settings::validate`].
    pub fn new(
        store: Arc<S>,
        generator: G,
        clock: C,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            store,
            generator,
            clock,
            settings,
            events: Arc::new(TracingEventSink),
        })
    }

    /// Replaces the default tracing event sink.
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Validates that the URL is absolute and names a host.
    ///
    /// The string is stored as given, so it must also be usable verbatim as a
    /// `Location` header: control and whitespace characters are rejected
    /// instead of being percent-encoded by the parser.
    fn validate_url(url: &str) -> Result<(), ShortenError> {
        if url.trim().is_empty() {
            return Err(ShortenError::InvalidUrl("URL cannot be empty".to_string()));
        }

        if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(ShortenError::InvalidUrl(format!(
                "URL must not contain control or whitespace characters: {:?}",
                url
            )));
        }

        let parsed = Url::parse(url)
            .map_err(|e| ShortenError::InvalidUrl(format!("{}: {}", e, url)))?;

        if !parsed.has_host() {
            return Err(ShortenError::InvalidUrl(format!(
                "URL must have a scheme and a host: {}",
                url
            )));
        }

        Ok(())
    }

    /// Computes the expiry for a request made at `now`.
    fn expiry(&self, now: Timestamp, minutes: Option<i64>) -> Result<Timestamp, ShortenError> {
        let minutes = minutes.unwrap_or(self.settings.default_validity_minutes);
        if minutes <= 0 {
            return Err(ShortenError::InvalidValidity(format!(
                "validity must be a positive number of minutes, got {}",
                minutes
            )));
        }

        let validity = minutes
            .checked_mul(60)
            .map(SignedDuration::from_secs)
            .ok_or_else(|| {
                ShortenError::InvalidValidity(format!("validity of {} minutes is too large", minutes))
            })?;

        now.checked_add(validity).map_err(|e| {
            ShortenError::InvalidValidity(format!("validity of {} minutes is too large: {e}", minutes))
        })
    }

    fn parse_custom_code(code: String) -> Result<ShortCode, ShortenError> {
        ShortCode::new(code).map_err(|e| match e {
            CoreError::InvalidShortCode(message) => ShortenError::InvalidShortCode(message),
            other => ShortenError::InvalidShortCode(other.to_string()),
        })
    }

    fn build_record(
        code: ShortCode,
        long_url: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Record, ShortenError> {
        Record::new(code, long_url, now, expires_at)
            .map_err(|e| ShortenError::InvalidValidity(e.to_string()))
    }

    /// Inserts the record, first clearing an expired occupant of its code.
    fn claim(&self, record: Record, now: Timestamp) -> Result<(), StorageError> {
        let code = record.code().clone();

        if let Some(occupant) = self.store.lookup(&code) {
            if !is_expired(&occupant, now) {
                return Err(StorageError::Conflict(code.to_string()));
            }
            if self
                .store
                .delete_if(&code, &|current| is_expired(current, now))
            {
                self.events.emit(&Event::ExpiredCodeReclaimed { code });
            }
        }

        self.store.try_insert(record)
    }

    fn claim_custom(
        &self,
        code: ShortCode,
        long_url: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<ShortCode, ShortenError> {
        let record = Self::build_record(code.clone(), long_url, now, expires_at)?;

        match self.claim(record, now) {
            Ok(()) => Ok(code),
            Err(StorageError::Conflict(taken)) => {
                debug!(code = %taken, "requested code is taken");
                Err(ShortenError::CodeTaken(taken))
            }
        }
    }

    fn claim_generated(
        &self,
        long_url: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<ShortCode, ShortenError> {
        let attempts = self.settings.max_generation_retries;

        for attempt in 1..=attempts {
            let candidate: ShortCode = self.generator.generate().into();
            let record = Self::build_record(candidate.clone(), long_url, now, expires_at)?;

            match self.claim(record, now) {
                Ok(()) => return Ok(candidate),
                Err(StorageError::Conflict(_)) => {
                    trace!(candidate = %candidate, attempt, "generated code collided");
                    self.events
                        .emit(&Event::CollisionRetried { candidate, attempt });
                }
            }
        }

        warn!(attempts, "no free short code found, giving up");
        Err(ShortenError::GenerationExhausted { attempts })
    }
}

impl<S: MappingStore, G: Generator, C: Clock> Shortener for ShortenService<S, G, C> {
    fn shorten(&self, request: ShortenRequest) -> Result<Shortened, ShortenError> {
        Self::validate_url(&request.long_url)?;

        let now = self.clock.now();
        let expires_at = self.expiry(now, request.validity_minutes)?;

        let (code, custom) = match request.custom_code {
            Some(code) => {
                let code = Self::parse_custom_code(code)?;
                (
                    self.claim_custom(code, &request.long_url, now, expires_at)?,
                    true,
                )
            }
            None => (
                self.claim_generated(&request.long_url, now, expires_at)?,
                false,
            ),
        };

        self.events.emit(&Event::ShortcodeCreated {
            code: code.clone(),
            expires_at,
            custom,
        });

        Ok(Shortened { code, expires_at })
    }
}
