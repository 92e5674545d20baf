//! Short code generators for the snip URL shortener.
//!
//! Provides the [`CodeGenerator`] trait, the secure random
//! [`RandomGenerator`] used in production, and a deterministic
//! [`SequenceGenerator`] for tests.

pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings};
pub use seq::SequenceGenerator;

use snip_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure producers with no storage knowledge; the
/// resolver owns collision handling. Each call must be statistically
/// independent of previous calls so that collision retries are
/// independent draws.
pub trait CodeGenerator: Send + Sync + 'static {
    /// Draws the next candidate short code.
    ///
    /// Fails only when the underlying randomness source fails; a failed
    /// draw must never silently degrade into a less random code.
    fn generate(&self) -> Result<ShortCode, GeneratorError>;
}
