use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    /// The operating system's entropy source failed. Surfaced rather
    /// than falling back to a weaker source, since collision resistance
    /// depends on draw quality.
    #[error("random source failure: {0}")]
    Entropy(getrandom::Error),
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet must be ASCII")]
    AlphabetNotAscii,
    #[error("alphabet must contain at most 256 symbols, got {0}")]
    AlphabetTooLarge(usize),
    #[error("code length must be at least 1")]
    ZeroLength,
}
