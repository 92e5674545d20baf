use async_trait::async_trait;
use snip_core::{
    InsertOutcome, MappingRecord, MappingStore, ShortCode, ShortenOutcome, ShortenParams,
    Shortener, ShortenerError, StoreError,
};
use snip_generator::CodeGenerator;
use snip_normalize::UrlNormalizer;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Configures a [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Upper bound on generate-and-insert attempts for one request. The
    /// loop fails fast with `GenerationExhausted` instead of degrading
    /// into unbounded retries under high collision rates.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// Composes a `MappingStore`, a `CodeGenerator`, and a `UrlNormalizer`
/// to handle one shortening request end to end: normalization, the
/// dedup check, custom-alias validation, and the bounded generation
/// loop. Uniqueness is enforced by the store's atomic insert; each loop
/// iteration is an independent draw followed by one atomic
/// check-and-insert, so two concurrent requests can never race the same
/// code past a read-then-write gap.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G, N> {
    store: Arc<S>,
    generator: Arc<G>,
    normalizer: Arc<N>,
    settings: ShortenerSettings,
}

impl<S, G, N> ShortenerService<S, G, N>
where
    S: MappingStore,
    G: CodeGenerator,
    N: UrlNormalizer,
{
    /// Creates a service with the default settings.
    pub fn new(store: S, generator: G, normalizer: N) -> Self {
        Self::with_settings(store, generator, normalizer, ShortenerSettings::default())
    }

    /// Creates a service with custom settings.
    pub fn with_settings(
        store: S,
        generator: G,
        normalizer: N,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            normalizer: Arc::new(normalizer),
            settings,
        }
    }

    async fn insert_custom_alias(
        &self,
        alias: String,
        canonical_url: &str,
    ) -> Result<ShortenOutcome, ShortenerError> {
        let code = ShortCode::new(alias)?;

        match self.store.insert(&code, canonical_url).await {
            Ok(InsertOutcome::Inserted) => {
                debug!(code = %code, url = %canonical_url, "stored mapping under custom alias");
                Ok(ShortenOutcome::Created(code))
            }
            Ok(InsertOutcome::Deduplicated(existing)) => {
                debug!(code = %existing, url = %canonical_url, "url bound concurrently, reusing");
                Ok(ShortenOutcome::Reused(existing))
            }
            Err(StoreError::Conflict(taken)) => Err(ShortenerError::AliasConflict(taken)),
            Err(other) => Err(store_to_shortener_error(other)),
        }
    }

    async fn insert_generated(
        &self,
        canonical_url: &str,
    ) -> Result<ShortenOutcome, ShortenerError> {
        for attempt in 1..=self.settings.max_attempts {
            let code = self
                .generator
                .generate()
                .map_err(|e| ShortenerError::RandomSource(e.to_string()))?;

            match self.store.insert(&code, canonical_url).await {
                Ok(InsertOutcome::Inserted) => {
                    debug!(code = %code, url = %canonical_url, attempt, "stored new mapping");
                    return Ok(ShortenOutcome::Created(code));
                }
                Ok(InsertOutcome::Deduplicated(existing)) => {
                    debug!(code = %existing, url = %canonical_url, "url bound concurrently, reusing");
                    return Ok(ShortenOutcome::Reused(existing));
                }
                Err(StoreError::Conflict(_)) => {
                    debug!(code = %code, attempt, "generated code collided, redrawing");
                }
                Err(other) => return Err(store_to_shortener_error(other)),
            }
        }

        warn!(
            url = %canonical_url,
            attempts = self.settings.max_attempts,
            "exhausted code generation attempts"
        );
        Err(ShortenerError::GenerationExhausted {
            attempts: self.settings.max_attempts,
        })
    }
}

#[async_trait]
impl<S, G, N> Shortener for ShortenerService<S, G, N>
where
    S: MappingStore,
    G: CodeGenerator,
    N: UrlNormalizer,
{
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenOutcome, ShortenerError> {
        let canonical_url = self
            .normalizer
            .normalize(&params.url)
            .map_err(|e| ShortenerError::InvalidUrl(e.to_string()))?;

        // Dedup check comes before everything else, including alias
        // validation: shortening an already-known URL is idempotent.
        if let Some(existing) = self
            .store
            .lookup_url(&canonical_url)
            .await
            .map_err(store_to_shortener_error)?
        {
            debug!(code = %existing, url = %canonical_url, "url already shortened, reusing");
            return Ok(ShortenOutcome::Reused(existing));
        }

        match params.custom_alias {
            Some(alias) => self.insert_custom_alias(alias, &canonical_url).await,
            None => self.insert_generated(&canonical_url).await,
        }
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<MappingRecord>, ShortenerError> {
        trace!(code = %code, "resolving short code");

        match self
            .store
            .lookup(code)
            .await
            .map_err(store_to_shortener_error)?
        {
            Some(record) => {
                self.store
                    .record_hit(code)
                    .await
                    .map_err(store_to_shortener_error)?;
                debug!(code = %code, url = %record.canonical_url, "resolved short code");
                Ok(Some(record))
            }
            None => {
                trace!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }

    async fn snapshot(&self) -> Result<Vec<MappingRecord>, ShortenerError> {
        self.store.list_all().await.map_err(store_to_shortener_error)
    }
}

/// Converts a `StoreError` to a `ShortenerError`.
fn store_to_shortener_error(e: StoreError) -> ShortenerError {
    match e {
        StoreError::Conflict(code) => ShortenerError::AliasConflict(code),
        other => ShortenerError::Store(other.to_string()),
    }
}
