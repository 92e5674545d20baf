use crate::error::GeneratorError;
use crate::CodeGenerator;
use snip_core::ShortCode;
use typed_builder::TypedBuilder;

/// Lowercase, uppercase, digits: 62 symbols.
const BASE62_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const DEFAULT_CODE_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
///
/// The defaults (6 characters over base62, a space of roughly 5.6e10
/// codes) keep collision probability low within the resolver's bounded
/// retries. The alphabet and length are restrictable so that collision
/// and exhaustion behavior can be exercised in tests.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters per code.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub length: usize,
    /// Symbols codes are drawn from. Must be non-empty ASCII with at
    /// most 256 symbols.
    #[builder(default = BASE62_ALPHABET.to_owned(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Generates fixed-length codes drawn uniformly from an alphabet using
/// the operating system's secure entropy source.
///
/// Uniformity is preserved by rejection sampling: bytes at or above the
/// largest multiple of the alphabet size are redrawn instead of taken
/// modulo the alphabet size, which would bias low symbols.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
    alphabet: Vec<u8>,
    /// Bytes below this value map to alphabet symbols without bias.
    accept_below: u16,
}

impl RandomGenerator {
    /// Creates a generator with the default settings.
    pub fn new() -> Self {
        Self::with_settings(RandomGeneratorSettings::default())
            .expect("default generator settings are valid")
    }

    /// Creates a generator from validated settings.
    pub fn with_settings(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        if settings.length == 0 {
            return Err(GeneratorError::ZeroLength);
        }
        if settings.alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }
        if !settings.alphabet.is_ascii() {
            return Err(GeneratorError::AlphabetNotAscii);
        }
        if settings.alphabet.len() > 256 {
            return Err(GeneratorError::AlphabetTooLarge(settings.alphabet.len()));
        }

        let alphabet = settings.alphabet.into_bytes();
        let accept_below = 256 - (256 % alphabet.len() as u16);

        Ok(Self {
            length: settings.length,
            alphabet,
            accept_below,
        })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomGenerator {
    fn generate(&self) -> Result<ShortCode, GeneratorError> {
        let mut code = String::with_capacity(self.length);
        let mut buf = [0u8; 32];

        while code.len() < self.length {
            getrandom::fill(&mut buf).map_err(GeneratorError::Entropy)?;

            for &byte in &buf {
                if code.len() == self.length {
                    break;
                }
                if u16::from(byte) < self.accept_below {
                    let index = byte as usize % self.alphabet.len();
                    code.push(self.alphabet[index] as char);
                }
            }
        }

        Ok(ShortCode::new_unchecked(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = RandomGeneratorSettings::default();
        assert_eq!(settings.length, 6);
        assert_eq!(settings.alphabet.len(), 62);
    }

    #[test]
    fn generates_codes_of_configured_length() {
        let generator = RandomGenerator::new();

        let code = generator.generate().unwrap();
        assert_eq!(code.as_str().len(), 6);
    }

    #[test]
    fn generated_symbols_come_from_the_alphabet() {
        let generator = RandomGenerator::new();

        for _ in 0..20 {
            let code = generator.generate().unwrap();
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_draws_differ() {
        let generator = RandomGenerator::new();

        // 62^6 codes: two equal consecutive draws indicate a broken source.
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn restricted_alphabet() {
        let settings = RandomGeneratorSettings::builder()
            .length(1)
            .alphabet("a")
            .build();
        let generator = RandomGenerator::with_settings(settings).unwrap();

        let code = generator.generate().unwrap();
        assert_eq!(code.as_str(), "a");
    }

    #[test]
    fn rejects_zero_length() {
        let settings = RandomGeneratorSettings::builder().length(0).build();
        assert!(matches!(
            RandomGenerator::with_settings(settings),
            Err(GeneratorError::ZeroLength)
        ));
    }

    #[test]
    fn rejects_empty_alphabet() {
        let settings = RandomGeneratorSettings::builder().alphabet("").build();
        assert!(matches!(
            RandomGenerator::with_settings(settings),
            Err(GeneratorError::EmptyAlphabet)
        ));
    }

    #[test]
    fn rejects_non_ascii_alphabet() {
        let settings = RandomGeneratorSettings::builder().alphabet("abcé").build();
        assert!(matches!(
            RandomGenerator::with_settings(settings),
            Err(GeneratorError::AlphabetNotAscii)
        ));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
