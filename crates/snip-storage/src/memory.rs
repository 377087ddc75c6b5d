use crate::error::{Result, StorageError};
use crate::store::{MappingStore, Snapshot};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use snip_core::{Record, ShortCode};
use std::sync::Arc;
use tracing::trace;

/// In-memory implementation of [`MappingStore`] using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Same-code inserts go through the entry API,
/// which holds the shard's write lock across the check and the insert.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<ShortCode, Arc<Record>>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

impl MappingStore for InMemoryStore {
    fn try_insert(&self, record: Record) -> Result<()> {
        match self.storage.entry(record.code().clone()) {
            Entry::Occupied(occupied) => {
                trace!(code = %occupied.key(), "insert rejected, code occupied");
                Err(StorageError::Conflict(occupied.key().to_string()))
            }
            Entry::Vacant(vacant) => {
                trace!(code = %vacant.key(), "record inserted");
                vacant.insert(Arc::new(record));
                Ok(())
            }
        }
    }

    fn lookup(&self, code: &ShortCode) -> Option<Arc<Record>> {
        self.storage.get(code).map(|entry| Arc::clone(entry.value()))
    }

    fn delete(&self, code: &ShortCode) -> bool {
        self.storage.remove(code).is_some()
    }

    fn delete_if(&self, code: &ShortCode, predicate: &dyn Fn(&Record) -> bool) -> bool {
        self.storage
            .remove_if(code, |_, record| predicate(record))
            .is_some()
    }

    fn scan_all(&self) -> Snapshot {
        let records = self
            .storage
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        Snapshot::new(records)
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}
