//! In-memory mapping store for the snip URL shortener.
//!
//! Provides [`InMemoryStore`], the authoritative dual-index
//! implementation of the `MappingStore` trait from `snip_core`.

pub mod memory;

pub use memory::InMemoryStore;
