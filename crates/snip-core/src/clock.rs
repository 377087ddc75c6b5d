use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use std::sync::Arc;

/// Source of the current time for expiry decisions.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by [`Timestamp::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to
/// the services and keep another to advance time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(RwLock::new(now)),
        }
    }

    /// Jumps the clock to `now`, backwards or forwards.
    pub fn set(&self, now: Timestamp) {
        *self.inner.write() = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.inner.write();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.inner.read()
    }
}
