//! Core types and traits for the Snip URL shortener.
//!
//! This crate provides the types shared by the generator, the store,
//! the shortening and resolving services and the HTTP gateway.

pub mod clock;
pub mod error;
pub mod event;
pub mod expiry;
pub mod record;
pub mod settings;
pub mod shortcode;
pub mod shortener;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, ResolveError, ShortenError};
pub use event::{Event, EventSink, NoopEventSink, TracingEventSink};
pub use expiry::is_expired;
pub use record::Record;
pub use settings::Settings;
pub use shortcode::ShortCode;
pub use shortener::{Resolved, Resolver, ShortenRequest, Shortened, Shortener};
