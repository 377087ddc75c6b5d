use crate::error::Result;
use snip_core::{Record, ShortCode};
use std::sync::Arc;

/// The sole authority on the code → record association.
///
/// Implementations must make [`try_insert`](MappingStore::try_insert)
/// linearizable per code: of any number of racing inserts for one code,
/// exactly one succeeds. The store never interprets time; callers decide
/// what "expired" means and pass it in through [`delete_if`](MappingStore::delete_if).
pub trait MappingStore: Send + Sync + 'static {
    /// Inserts the record under its own code.
    /// Returns `Err(Conflict)` if any entry already occupies the code.
    fn try_insert(&self, record: Record) -> Result<()>;

    /// Returns the stored record, expired or not.
    fn lookup(&self, code: &ShortCode) -> Option<Arc<Record>>;

    /// Removes the entry for `code`.
    /// Returns `true` if the record existed and was removed.
    fn delete(&self, code: &ShortCode) -> bool;

    /// Removes the entry for `code` only if `predicate` holds for the record
    /// currently stored, checked and removed atomically.
    fn delete_if(&self, code: &ShortCode, predicate: &dyn Fn(&Record) -> bool) -> bool;

    /// Takes a point-in-time snapshot of every stored record.
    fn scan_all(&self) -> Snapshot;

    /// Number of stored records, live or expired.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Records captured by [`MappingStore::scan_all`].
///
/// The snapshot owns shared handles to the records, so iterating it never
/// holds a lock on the store.
#[derive(Debug)]
pub struct Snapshot {
    records: std::vec::IntoIter<Arc<Record>>,
}

impl Snapshot {
    pub fn new(records: Vec<Arc<Record>>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl Iterator for Snapshot {
    type Item = Arc<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Snapshot {}
