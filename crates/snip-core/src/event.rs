//! Structured events emitted by the services and the reaper.
//!
//! Sinks are purely observational: nothing a sink does can change the
//! outcome of the call that emitted the event.

use crate::shortcode::ShortCode;
use jiff::Timestamp;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new mapping was stored.
    ShortcodeCreated {
        code: ShortCode,
        expires_at: Timestamp,
        custom: bool,
    },
    /// A generated candidate was already live; another one will be drawn.
    CollisionRetried { candidate: ShortCode, attempt: u32 },
    /// An expired record was removed so its code could be allocated again.
    ExpiredCodeReclaimed { code: ShortCode },
    /// A resolve hit a record past its expiry.
    RecordExpired { code: ShortCode },
    /// The reaper removed an expired record.
    RecordReaped { code: ShortCode },
    /// A reaper cycle finished.
    ReapCycleCompleted { scanned: usize, removed: usize },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::ShortcodeCreated { .. } => "shortcode_created",
            Event::CollisionRetried { .. } => "collision_retried",
            Event::ExpiredCodeReclaimed { .. } => "expired_code_reclaimed",
            Event::RecordExpired { .. } => "record_expired",
            Event::RecordReaped { .. } => "record_reaped",
            Event::ReapCycleCompleted { .. } => "reap_cycle_completed",
        }
    }
}

pub trait EventSink: Send + Sync + 'static {
    fn emit(&self, event: &Event);
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &Event) {
        let name = event.name();
        match event {
            Event::ShortcodeCreated {
                code,
                expires_at,
                custom,
            } => {
                info!(event = name, code = %code, expires_at = %expires_at, custom, "shortcode created")
            }
            Event::CollisionRetried { candidate, attempt } => {
                debug!(event = name, candidate = %candidate, attempt, "collision retried")
            }
            Event::ExpiredCodeReclaimed { code } => {
                debug!(event = name, code = %code, "expired code reclaimed")
            }
            Event::RecordExpired { code } => {
                debug!(event = name, code = %code, "record expired")
            }
            Event::RecordReaped { code } => {
                debug!(event = name, code = %code, "record reaped")
            }
            Event::ReapCycleCompleted { scanned, removed } => {
                debug!(event = name, scanned, removed, "reap cycle completed")
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &Event) {}
}
