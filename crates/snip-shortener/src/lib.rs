//! URL shortener service implementation.
//!
//! This crate provides [`ShortenService`], the [`snip_core::Shortener`]
//! backed by a [`snip_storage::MappingStore`] and a
//! [`snip_generator::Generator`].

pub mod service;

pub use service::ShortenService;
