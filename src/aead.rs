//! Authenticated encryption with XChaCha20-Poly1305.
//!
//! Ciphertexts are self-describing: a random 24-byte nonce prefix followed
//! by the sealed payload and its 16-byte tag.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit, Payload},
};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kdf::Key;
use crate::random::RandomSource;
use crate::{NONCE_LEN, TAG_LEN, validate};

/// Attempts before a persistently all-zero nonce is reported as an error.
const NONCE_ATTEMPTS: usize = 4;

/// Generate a random nonce at the head of a buffer sized for the eventual
/// sealed output.
///
/// The extra capacity is a hint only; the returned buffer always has
/// length [`NONCE_LEN`]. An all-zero outcome is discarded and regenerated.
pub fn new_nonce(
    rng: &dyn RandomSource,
    plaintext_len: usize,
    overhead: usize,
) -> Result<Vec<u8>> {
    let mut nonce = Vec::with_capacity(NONCE_LEN + plaintext_len + overhead);
    nonce.resize(NONCE_LEN, 0);

    for _ in 0..NONCE_ATTEMPTS {
        rng.fill(&mut nonce)?;
        if validate::nonce_not_zero(&nonce).is_ok() {
            return Ok(nonce);
        }
    }

    Err(Error::AllZeroNonce)
}

/// Encrypt `plaintext` under `key`, binding `aad` when present.
///
/// Returns `nonce || ciphertext || tag`. Absent associated data and
/// present-but-empty associated data authenticate interchangeably; any
/// other value must be supplied identically to [`decrypt`].
pub fn encrypt(
    rng: &dyn RandomSource,
    key: &Key,
    plaintext: &[u8],
    aad: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let cipher =
        XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| Error::CipherInit)?;

    let mut out = new_nonce(rng, plaintext.len(), TAG_LEN)?;
    let sealed = cipher
        .encrypt(
            XNonce::from_slice(&out),
            Payload {
                msg: plaintext,
                aad: aad.unwrap_or(&[]),
            },
        )
        .map_err(|_| Error::CipherInit)?;
    out.extend_from_slice(&sealed);

    Ok(out)
}

/// Decrypt a buffer produced by [`encrypt`].
///
/// Fails closed: tampering anywhere in the buffer, a wrong key, or
/// mismatched associated data all surface as [`Error::Authentication`]
/// with no further detail. The plaintext buffer is zeroed on drop.
pub fn decrypt(key: &Key, data: &[u8], aad: Option<&[u8]>) -> Result<Zeroizing<Vec<u8>>> {
    let cipher =
        XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| Error::CipherInit)?;

    if data.len() < NONCE_LEN {
        return Err(Error::CiphertextTooShort {
            len: data.len(),
            min: NONCE_LEN,
        });
    }

    let (nonce, sealed) = data.split_at(NONCE_LEN);
    let plaintext = cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: aad.unwrap_or(&[]),
            },
        )
        .map_err(|_| Error::Authentication)?;

    Ok(Zeroizing::new(plaintext))
}
