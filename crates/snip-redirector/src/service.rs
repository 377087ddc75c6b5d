use std::sync::Arc;

use snip_core::{
    is_expired, Clock, Event, EventSink, ResolveError, Resolved, Resolver, ShortCode,
    TracingEventSink,
};
use snip_storage::MappingStore;
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Looks records up in a [`MappingStore`] and handles expiration checks.
/// An expired record found on the read path is removed right away instead of
/// waiting for the reaper.
pub struct ResolveService<S, C> {
    store: Arc<S>,
    clock: C,
    events: Arc<dyn EventSink>,
}

impl<S: MappingStore, C: Clock> ResolveService<S, C> {
    /// Creates a new ResolveService over the given store.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self {
            store,
            clock,
            events: Arc::new(TracingEventSink),
        }
    }

    /// Replaces the default tracing event sink.
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Returns
    ///
    /// * `Ok(resolved)` - The target URL and expiry if the record is live
    /// * `Err(ResolveError::NotFound)` - If no record exists for the code
    /// * `Err(ResolveError::Expired)` - If the record exists but has expired
    pub fn resolve(&self, code: &str) -> Result<Resolved, ResolveError> {
        Resolver::resolve(self, code)
    }
}

impl<S: MappingStore, C: Clock> Resolver for ResolveService<S, C> {
    fn resolve(&self, code: &str) -> Result<Resolved, ResolveError> {
        trace!(code = %code, "resolving short code");

        // a code that could never have been issued is simply absent
        let code = ShortCode::new_unchecked(code);

        let Some(record) = self.store.lookup(&code) else {
            trace!(code = %code, "short code not found");
            return Err(ResolveError::NotFound(code.to_string()));
        };

        let now = self.clock.now();
        if is_expired(&record, now) {
            debug!(code = %code, expires_at = %record.expires_at(), "record has expired");
            if self
                .store
                .delete_if(&code, &|current| is_expired(current, now))
            {
                self.events.emit(&Event::RecordExpired { code: code.clone() });
            }
            return Err(ResolveError::Expired(code.to_string()));
        }

        debug!(code = %code, url = %record.target_url(), "resolved short code");
        Ok(Resolved {
            long_url: record.target_url().to_string(),
            expires_at: record.expires_at(),
        })
    }
}
