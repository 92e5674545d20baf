use async_trait::async_trait;
use snip_core::{
    Clock, InsertOutcome, MappingRecord, MappingStore, ShortCode, StoreError, SystemClock,
};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    /// Primary index: short code -> record.
    by_code: HashMap<String, MappingRecord>,
    /// Reverse index: canonical URL -> short code, used for dedup.
    by_url: HashMap<String, ShortCode>,
}

/// In-memory implementation of the `MappingStore` trait.
///
/// Both indexes live under a single `RwLock`: readers run in parallel
/// with each other, while `insert` and `record_hit` take the write lock
/// so no reader can observe a state where only one index holds an
/// entry. The critical sections are constant-time and never held across
/// an await point.
#[derive(Debug)]
pub struct InMemoryStore<C: Clock = SystemClock> {
    inner: RwLock<StoreInner>,
    clock: C,
}

impl InMemoryStore<SystemClock> {
    /// Creates a new store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryStore<C> {
    /// Creates a new store reading record creation times from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            clock,
        }
    }
}

#[async_trait]
impl<C: Clock + 'static> MappingStore for InMemoryStore<C> {
    async fn insert(
        &self,
        code: &ShortCode,
        canonical_url: &str,
    ) -> Result<InsertOutcome, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        // Dedup wins over everything else: a URL already bound keeps its
        // existing code, regardless of what code this request carried.
        if let Some(existing) = inner.by_url.get(canonical_url) {
            return Ok(InsertOutcome::Deduplicated(existing.clone()));
        }

        if inner.by_code.contains_key(code.as_str()) {
            return Err(StoreError::Conflict(code.to_string()));
        }

        let record = MappingRecord {
            code: code.clone(),
            canonical_url: canonical_url.to_owned(),
            created_at: self.clock.now(),
            clicks: 0,
        };

        // Both index writes happen under the same lock hold, so the
        // dual-index invariant is never observable half-applied.
        inner.by_code.insert(code.as_str().to_owned(), record);
        inner.by_url.insert(canonical_url.to_owned(), code.clone());

        Ok(InsertOutcome::Inserted)
    }

    async fn lookup(&self, code: &ShortCode) -> Result<Option<MappingRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.by_code.get(code.as_str()).cloned())
    }

    async fn lookup_url(&self, canonical_url: &str) -> Result<Option<ShortCode>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.by_url.get(canonical_url).cloned())
    }

    async fn record_hit(&self, code: &ShortCode) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        // A hit on a vanished code is deliberately not an error.
        if let Some(record) = inner.by_code.get_mut(code.as_str()) {
            record.clicks += 1;
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MappingRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;

        let mut records: Vec<MappingRecord> = inner.by_code.values().cloned().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.as_str().cmp(b.code.as_str()))
        });

        Ok(records)
    }
}
