//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the shared vocabulary used by the mapping store
//! and the shortener service: validated short codes, mapping records,
//! the store and shortener seams, and the error taxonomy.

pub mod clock;
pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, ShortenerError, StoreError};
pub use shortcode::ShortCode;
pub use shortener::{ShortenOutcome, ShortenParams, Shortener};
pub use store::{InsertOutcome, MappingRecord, MappingStore};
