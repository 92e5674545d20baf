//! Shortener service for the snip URL shortener.
//!
//! This crate provides [`ShortenerService`], the code resolver that
//! decides the short code for each request: dedup first, then either
//! the caller's custom alias or a bounded random-generation loop, with
//! persistence delegated to a `MappingStore`.

pub mod service;

pub use service::{ShortenerService, ShortenerSettings};
