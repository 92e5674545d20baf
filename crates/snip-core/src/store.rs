use crate::error::StoreError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored mapping from a short code to its canonical URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// The unique short code, immutable after creation.
    pub code: ShortCode,
    /// The normalized original URL, immutable after creation.
    pub canonical_url: String,
    /// When the mapping was created.
    pub created_at: Timestamp,
    /// How many times the mapping has been resolved.
    pub clicks: u64,
}

/// The result of a successful [`MappingStore::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was created under the requested code.
    Inserted,
    /// The canonical URL was already bound to an existing code; nothing
    /// was mutated. Carries the code the URL is bound to.
    Deduplicated(ShortCode),
}

/// Thread-safe authoritative storage for URL mappings.
///
/// Implementations own both the code index and the reverse URL index
/// and keep them mutually consistent: every `(code, canonical_url)` pair
/// present in one index is present in the other, at every point
/// observable by a concurrent reader. Records are never removed.
#[async_trait]
pub trait MappingStore: Send + Sync + 'static {
    /// Atomically binds `code` to `canonical_url`.
    ///
    /// In a single critical section: if the URL is already bound to some
    /// code, returns [`InsertOutcome::Deduplicated`] without mutating; if
    /// the code is already taken, fails with [`StoreError::Conflict`];
    /// otherwise creates a record with zero clicks and the store clock's
    /// current time, writing both indexes together.
    async fn insert(
        &self,
        code: &ShortCode,
        canonical_url: &str,
    ) -> Result<InsertOutcome, StoreError>;

    /// Retrieves the record for a short code.
    /// Returns `None` if the code does not exist.
    async fn lookup(&self, code: &ShortCode) -> Result<Option<MappingRecord>, StoreError>;

    /// Retrieves the short code a canonical URL is bound to, if any.
    async fn lookup_url(&self, canonical_url: &str) -> Result<Option<ShortCode>, StoreError>;

    /// Atomically increments the click counter for an existing record.
    ///
    /// A hit on a code that does not exist is a deliberate no-op, not an
    /// error.
    async fn record_hit(&self, code: &ShortCode) -> Result<(), StoreError>;

    /// Returns all records as a consistent point-in-time snapshot,
    /// ordered by creation time (ties broken by code).
    async fn list_all(&self) -> Result<Vec<MappingRecord>, StoreError>;
}
