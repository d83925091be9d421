//! Cryptographically secure random byte generation.

use crate::error::{Error, Result};

/// A source of cryptographically secure random bytes.
///
/// Production code binds [`OsRandom`] once at startup. Tests can inject a
/// deterministic source to exercise buffer sizing and the all-zero nonce
/// check without flakiness.
pub trait RandomSource {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<()>;

    /// Generate a fresh buffer of `size` random bytes.
    fn generate(&self, size: usize) -> Result<Vec<u8>> {
        if size == 0 {
            return Err(Error::InvalidRandomSize);
        }

        let mut buf = vec![0u8; size];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

/// The operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf).map_err(|_| Error::RandomFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_request_fails() {
        assert!(matches!(
            OsRandom.generate(0),
            Err(Error::InvalidRandomSize)
        ));
    }

    #[test]
    fn generate_returns_requested_length() {
        let buf = OsRandom.generate(16).unwrap();
        assert_eq!(buf.len(), 16);
    }

    #[test]
    fn successive_fills_differ() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill(&mut a).unwrap();
        OsRandom.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
