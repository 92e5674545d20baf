use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors surfaced by mapping store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("store lock poisoned by a panicked writer")]
    LockPoisoned,
}

/// The caller-facing error taxonomy of the shortener service.
///
/// Every variant is a per-request condition; nothing here is fatal to
/// the process. Absence of a code on lookup is `Ok(None)`, not an error.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("random source failure: {0}")]
    RandomSource(String),
    #[error("store error: {0}")]
    Store(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
