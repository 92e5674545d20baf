use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use crate::store::MappingRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for a single shortening request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenParams {
    /// The raw URL to shorten. Normalized by the service before any
    /// other step, so dedup always operates on canonical strings.
    pub url: String,
    /// Optional caller-supplied custom alias. Validated by the service;
    /// malformed aliases surface as
    /// [`ShortenerError::InvalidShortCode`].
    pub custom_alias: Option<String>,
}

impl ShortenParams {
    /// Shorthand for an auto-generated shortening request.
    pub fn auto(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            custom_alias: None,
        }
    }

    /// Shorthand for a request with a caller-supplied alias.
    pub fn with_alias(url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            custom_alias: Some(alias.into()),
        }
    }
}

/// The result of a successful shortening request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// A new mapping was created under this code.
    Created(ShortCode),
    /// The URL was already shortened; the existing code was returned
    /// and no second mapping was created.
    Reused(ShortCode),
}

impl ShortenOutcome {
    /// The short code the request resolved to.
    pub fn code(&self) -> &ShortCode {
        match self {
            ShortenOutcome::Created(code) | ShortenOutcome::Reused(code) => code,
        }
    }

    /// Whether an existing mapping was reused instead of created.
    pub fn is_reused(&self) -> bool {
        matches!(self, ShortenOutcome::Reused(_))
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Produces-or-reuses a short code for the given URL.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortenOutcome, ShortenerError>;

    /// Resolves a short code to its stored record, recording a click on
    /// a hit. Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<MappingRecord>, ShortenerError>;

    /// Returns all mappings as a consistent point-in-time snapshot.
    async fn snapshot(&self) -> Result<Vec<MappingRecord>, ShortenerError>;
}
