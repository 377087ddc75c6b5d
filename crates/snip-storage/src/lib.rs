//! In-memory mapping store and the background reaper that keeps it bounded.

pub mod error;
pub mod memory;
pub mod reaper;
pub mod store;

pub use error::{Result, StorageError};
pub use memory::InMemoryStore;
pub use reaper::{ReapReport, Reaper, ReaperHandle, MIN_REAP_INTERVAL};
pub use store::{MappingStore, Snapshot};
