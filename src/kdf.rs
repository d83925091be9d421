//! Key derivation.
//!
//! Turns a password into a 32-byte key with Argon2id, or produces purely
//! random session keys for data not tied to a password.

use argon2::{Algorithm, Argon2, Version};
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::{KEY_LEN, SALT_LEN, validate};

/// Tunable Argon2id cost parameters.
///
/// Callers persist these alongside the salt so a password-derived key can
/// be reconstructed later from the same inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Params {
    time_cost: u32,
    memory_cost_kib: u32,
    parallelism: u32,
    output_len: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            // one pass over 64 MiB across four lanes
            time_cost: 1,
            memory_cost_kib: 64 * 1024,
            parallelism: 4,
            output_len: KEY_LEN,
        }
    }
}

impl Params {
    /// Create validated parameters. The output length is fixed to
    /// [`KEY_LEN`], the only size the cipher accepts.
    pub fn new(time_cost: u32, memory_cost_kib: u32, parallelism: u32) -> Result<Self> {
        let params = Self {
            time_cost,
            memory_cost_kib,
            parallelism,
            output_len: KEY_LEN,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn memory_cost_kib(&self) -> u32 {
        self.memory_cost_kib
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_cost < 1 {
            return Err(Error::InvalidParams("time cost must be >= 1"));
        }
        if self.parallelism < 1 {
            return Err(Error::InvalidParams("parallelism must be >= 1"));
        }
        if self.memory_cost_kib < 8 * self.parallelism {
            return Err(Error::InvalidParams(
                "memory cost must be at least 8 * parallelism",
            ));
        }
        if self.output_len != KEY_LEN {
            return Err(Error::InvalidParams(
                "output length must match the cipher key size",
            ));
        }

        Ok(())
    }
}

/// A 32-byte symmetric key.
///
/// Key material is zeroed when the value is dropped and never appears in
/// `Debug` output. Keys are only created by this module; callers that need
/// one again re-derive it from the password, salt, and params.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("data", &"[REDACTED]").finish()
    }
}

/// Derive an encryption key from a password with Argon2id.
///
/// Deterministic: the same password, salt, and params always produce the
/// same key. The salt must be fresh per protection event and is validated
/// for length before the password's strength is checked.
pub fn derive_key(password: &str, salt: &[u8], params: Params) -> Result<Key> {
    validate::salt_len(salt)?;
    validate::password_strength(password)?;
    params.validate()?;

    let argon_params = argon2::Params::new(
        params.memory_cost_kib(),
        params.time_cost(),
        params.parallelism(),
        Some(params.output_len()),
    )
    .map_err(|_| Error::InvalidParams("rejected by argon2"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Key([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key.0)
        .map_err(|_| Error::Derivation)?;

    Ok(key)
}

/// Generate a random session key for data not tied to a password.
///
/// The salt is validated for length even though this path does not feed it
/// into a derivation; the caller stores it next to the params either way.
pub fn session_key(rng: &dyn RandomSource, salt: &[u8]) -> Result<Key> {
    validate::salt_len(salt)?;

    let mut key = Key([0u8; KEY_LEN]);
    rng.fill(&mut key.0)?;
    Ok(key)
}

/// Generate a fresh 32-byte salt.
///
/// Any failure here surfaces as [`Error::EntropyUnavailable`]: a broken
/// entropy source cannot be repaired locally, and no secret produced after
/// it would be safe to use.
pub fn generate_salt(rng: &dyn RandomSource) -> Result<[u8; SALT_LEN]> {
    let salt = rng
        .generate(SALT_LEN)
        .map_err(|_| Error::EntropyUnavailable)?;
    salt.try_into().map_err(|_| Error::EntropyUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    const PASSWORD: &str = "Tr0ub4dor&3xample!Long";

    struct FixedRandom(u8);

    impl RandomSource for FixedRandom {
        fn fill(&self, buf: &mut [u8]) -> Result<()> {
            buf.fill(self.0);
            Ok(())
        }
    }

    fn fast_params() -> Params {
        Params::new(1, 1024, 1).unwrap()
    }

    #[test]
    fn derivation_is_deterministic() {
        let salt = [42u8; SALT_LEN];

        let k1 = derive_key(PASSWORD, &salt, fast_params()).unwrap();
        let k2 = derive_key(PASSWORD, &salt, fast_params()).unwrap();

        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_salt_different_key() {
        let k1 = derive_key(PASSWORD, &[1u8; SALT_LEN], fast_params()).unwrap();
        let k2 = derive_key(PASSWORD, &[2u8; SALT_LEN], fast_params()).unwrap();

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn params_affect_output() {
        let salt = [7u8; SALT_LEN];

        let k1 = derive_key(PASSWORD, &salt, Params::new(1, 1024, 1).unwrap()).unwrap();
        let k2 = derive_key(PASSWORD, &salt, Params::new(2, 1024, 1).unwrap()).unwrap();

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn wrong_salt_length_rejected_before_password() {
        // a weak password must still report the salt error first
        let err = derive_key("password", &[0u8; 16], fast_params()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSaltLength {
                expected: SALT_LEN,
                actual: 16
            }
        ));
    }

    #[test]
    fn weak_password_rejected() {
        let err = derive_key("password", &[0u8; SALT_LEN], fast_params()).unwrap_err();
        assert!(matches!(err, Error::WeakPassword { .. }));
    }

    #[test]
    fn invalid_params_fail() {
        assert!(Params::new(0, 1024, 1).is_err());
        assert!(Params::new(1, 1024, 0).is_err());
        assert!(Params::new(1, 4, 1).is_err());
    }

    #[test]
    fn default_params_are_published_values() {
        let params = Params::default();
        assert_eq!(params.time_cost(), 1);
        assert_eq!(params.memory_cost_kib(), 65536);
        assert_eq!(params.parallelism(), 4);
        assert_eq!(params.output_len(), KEY_LEN);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn session_key_copies_exactly_the_generated_bytes() {
        let key = session_key(&FixedRandom(0xAB), &[0u8; SALT_LEN]).unwrap();
        assert_eq!(key.as_bytes(), &[0xAB; KEY_LEN]);
    }

    #[test]
    fn session_key_requires_valid_salt() {
        let err = session_key(&OsRandom, &[0u8; 31]).unwrap_err();
        assert!(matches!(err, Error::InvalidSaltLength { .. }));
    }

    #[test]
    fn session_keys_differ_across_calls() {
        let salt = [0u8; SALT_LEN];
        let k1 = session_key(&OsRandom, &salt).unwrap();
        let k2 = session_key(&OsRandom, &salt).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn generated_salt_has_expected_length() {
        let salt = generate_salt(&OsRandom).unwrap();
        assert_eq!(salt.len(), SALT_LEN);
    }

    #[test]
    fn debug_output_redacts_key_material() {
        let key = session_key(&FixedRandom(0x5C), &[0u8; SALT_LEN]).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("5c"));
        assert!(!debug.contains("92")); // 0x5c decimal
    }
}
