//! URL canonicalization for the snip URL shortener.
//!
//! Dedup correctness rests on two requests for "the same" URL producing
//! byte-identical canonical strings, so normalization must be
//! idempotent: `normalize(normalize(x)) == normalize(x)`.

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    #[error("invalid url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Maps a raw URL string to its canonical form, or fails.
pub trait UrlNormalizer: Send + Sync + 'static {
    fn normalize(&self, raw: &str) -> Result<String, NormalizeError>;
}

/// The canonicalization used in production.
///
/// Accepts only `http` and `https` URLs. Parsing already lowercases the
/// scheme and host and strips default ports (80/443); on top of that,
/// trailing slashes are trimmed from the path, except for the root
/// path. Query and fragment are kept as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalNormalizer;

impl UrlNormalizer for CanonicalNormalizer {
    fn normalize(&self, raw: &str) -> Result<String, NormalizeError> {
        let mut parsed = Url::parse(raw)?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(NormalizeError::UnsupportedScheme(other.to_owned())),
        }

        let path = parsed.path();
        if path != "/" && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/').to_owned();
            parsed.set_path(&trimmed);
        }

        Ok(parsed.into())
    }
}
