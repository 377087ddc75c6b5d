//! Redirector service library.
//!
//! This crate provides a [`ResolveService`] that resolves short codes to
//! their target URLs, treating expired records as gone.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use snip_core::{Record, ShortCode, SystemClock};
//! use snip_redirector::ResolveService;
//! use snip_storage::{InMemoryStore, MappingStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let now = jiff::Timestamp::now();
//! store.try_insert(Record::with_validity(
//!     ShortCode::new("abc123")?,
//!     "https://example.com",
//!     now,
//!     jiff::SignedDuration::from_mins(30),
//! )?)?;
//!
//! let service = ResolveService::new(store, SystemClock);
//! let resolved = service.resolve("abc123")?;
//! println!("Redirect to: {}", resolved.long_url);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod service;

pub use service::ResolveService;
