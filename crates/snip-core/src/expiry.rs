//! Expiry policy shared by lookup and reaping.

use crate::record::Record;
use jiff::Timestamp;

/// Returns `true` once `now` has reached the record's expiry.
///
/// The boundary is inclusive: a record expiring at `t` is already dead at `t`.
pub fn is_expired(record: &Record, now: Timestamp) -> bool {
    now >= record.expires_at()
}
