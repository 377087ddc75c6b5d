//! Background removal of expired records.

use crate::store::MappingStore;
use snip_core::{is_expired, Clock, Event, EventSink, TracingEventSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Shortest period the background reaper will tick at.
pub const MIN_REAP_INTERVAL: Duration = Duration::from_millis(1);

/// Counts from one reaper cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReapReport {
    pub scanned: usize,
    pub removed: usize,
}

/// Periodically sweeps a store and removes the records that have expired.
///
/// The reaper goes through the same [`MappingStore`] operations as the
/// services. Removal uses [`MappingStore::delete_if`] with the expiry check,
/// so a live record that replaced an expired one between the scan and the
/// delete is left alone.
pub struct Reaper<S, C> {
    store: Arc<S>,
    clock: C,
    events: Arc<dyn EventSink>,
}

impl<S: MappingStore, C: Clock> Reaper<S, C> {
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

    /// Runs a single sweep and reports what it did.
    pub fn run_once(&self) -> ReapReport {
        let now = self.clock.now();
        let mut report = ReapReport::default();

        for record in self.store.scan_all() {
            report.scanned += 1;
            if !is_expired(&record, now) {
                continue;
            }

            if self
                .store
                .delete_if(record.code(), &|current| is_expired(current, now))
            {
                report.removed += 1;
                self.events.emit(&Event::RecordReaped {
                    code: record.code().clone(),
                });
            }
        }

        self.events.emit(&Event::ReapCycleCompleted {
            scanned: report.scanned,
            removed: report.removed,
        });
        report
    }

    /// Spawns the reaper on the current tokio runtime, sweeping every `interval`.
    ///
    /// The first sweep happens one full interval after spawning. A sweep that
    /// panics is logged and the next one runs on schedule. The task stops
    /// when [`ReaperHandle::shutdown`] is called or the handle is dropped.
    /// An `interval` below [`MIN_REAP_INTERVAL`] is raised to it.
    pub fn spawn(self, interval: Duration) -> ReaperHandle {
        let interval = if interval < MIN_REAP_INTERVAL {
            warn!(requested = ?interval, used = ?MIN_REAP_INTERVAL, "reap interval too short, clamping");
            MIN_REAP_INTERVAL
        } else {
            interval
        };
        let reaper = Arc::new(self);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;
            info!(interval = ?interval, "reaper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let cycle = Arc::clone(&reaper);
                        match tokio::task::spawn_blocking(move || cycle.run_once()).await {
                            Ok(report) => {
                                debug!(scanned = report.scanned, removed = report.removed, "reap cycle finished");
                            }
                            Err(e) => {
                                error!(error = %e, "reap cycle failed, continuing with the next one");
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("reaper stopped");
        });

        ReaperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Controls a reaper spawned with [`Reaper::spawn`].
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for the task to finish.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // the receiver is gone only if the task already ended
        let _ = self.shutdown.send(true);
        self.task.await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
