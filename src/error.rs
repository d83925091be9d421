//! Error types for key derivation and encryption.

use thiserror::Error;

use crate::MIN_PASSWORD_BITS;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A zero-length random buffer was requested.
    #[error("cannot generate random array of zero length")]
    InvalidRandomSize,

    /// The entropy source failed to produce bytes.
    #[error("entropy source failure")]
    RandomFailed,

    /// Salt generation failed. The entropy source is broken and cannot be
    /// repaired locally; see [`Error::is_unrecoverable`].
    #[error("entropy source unavailable; cannot produce a salt")]
    EntropyUnavailable,

    /// A salt did not have the expected length.
    #[error("invalid salt: expected len {expected} but got {actual}")]
    InvalidSaltLength { expected: usize, actual: usize },

    /// The password's estimated entropy fell below the accepted minimum.
    #[error("password too weak: estimated {bits:.1} bits of entropy, need {min}", min = MIN_PASSWORD_BITS)]
    WeakPassword { bits: f64 },

    /// A freshly generated nonce was the degenerate all-zero value.
    #[error("got invalid all-zero nonce")]
    AllZeroNonce,

    /// Derivation parameters violated an invariant.
    #[error("invalid derivation parameters: {0}")]
    InvalidParams(&'static str),

    /// The key derivation function itself failed.
    #[error("key derivation failed")]
    Derivation,

    /// The cipher could not be constructed or driven.
    #[error("cipher failure")]
    CipherInit,

    /// A ciphertext was shorter than the nonce prefix it must carry.
    #[error("ciphertext is too short: {len} bytes, need at least {min}")]
    CiphertextTooShort { len: usize, min: usize },

    /// Tag verification failed. No detail is reported beyond this.
    #[error("authentication failed")]
    Authentication,
}

impl Error {
    /// True for failures the caller cannot recover from locally.
    ///
    /// The embedding application decides termination policy; this crate
    /// never aborts the process itself.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Error::EntropyUnavailable)
    }
}
