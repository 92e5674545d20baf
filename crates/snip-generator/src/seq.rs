use crate::error::GeneratorError;
use crate::CodeGenerator;
use snip_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator producing sequential codes like
/// "seq000000", "seq000001".
///
/// Useful in tests where code values must be predictable. Unique within
/// a single instance; infallible in practice, but implements the
/// fallible trait contract like any other generator.
#[derive(Debug)]
pub struct SequenceGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SequenceGenerator {
    /// Creates a new sequence generator with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(ShortCode::new_unchecked(format!(
            "{}{:06}",
            self.prefix, count
        )))
    }
}
