//! Key derivation and authenticated encryption for encrypted archives.
//!
//! Provides password-based key derivation (Argon2id), random session keys,
//! XChaCha20-Poly1305 encryption with optional associated data, and
//! content-addressed hashing. Every stored artifact in the surrounding
//! system is encrypted under a key produced here; persistence of salts,
//! params, and ciphertext is the caller's concern.

mod aead;
mod error;
mod hash;
mod kdf;
mod random;
pub mod validate;

pub use crate::aead::{decrypt, encrypt, new_nonce};
pub use crate::error::{Error, Result};
pub use crate::hash::{ObjectId, hash};
pub use crate::kdf::{Key, Params, derive_key, generate_salt, session_key};
pub use crate::random::{OsRandom, RandomSource};

/// Length of the salt (32 bytes).
pub const SALT_LEN: usize = 32;
/// Length of the nonce (24 bytes for XChaCha20-Poly1305).
pub const NONCE_LEN: usize = 24;
/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the Poly1305 authentication tag (16 bytes).
pub const TAG_LEN: usize = 16;
/// Length of a content identifier (32 bytes, SHA-256).
pub const ID_LEN: usize = 32;
/// Minimum estimated password entropy (bits) accepted for key derivation.
pub const MIN_PASSWORD_BITS: f64 = 60.0;
