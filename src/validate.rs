//! Input validation for key derivation and encryption.
//!
//! Every derivation path funnels through these checks; failures are
//! reported, never silently corrected.

use crate::error::{Error, Result};
use crate::{MIN_PASSWORD_BITS, SALT_LEN};

/// Check that a salt has exactly the expected length.
pub fn salt_len(salt: &[u8]) -> Result<()> {
    if salt.len() != SALT_LEN {
        return Err(Error::InvalidSaltLength {
            expected: SALT_LEN,
            actual: salt.len(),
        });
    }

    Ok(())
}

/// Reject the degenerate all-zero nonce.
///
/// A nonce failing this check must be discarded and regenerated, never
/// used.
pub fn nonce_not_zero(nonce: &[u8]) -> Result<()> {
    let mut acc = 0u8;
    for byte in nonce {
        acc |= byte;
    }

    if acc == 0 {
        return Err(Error::AllZeroNonce);
    }

    Ok(())
}

/// Reject passwords whose estimated entropy falls below
/// [`MIN_PASSWORD_BITS`].
pub fn password_strength(password: &str) -> Result<()> {
    let bits = estimate_entropy(password);
    if bits < MIN_PASSWORD_BITS {
        return Err(Error::WeakPassword { bits });
    }

    Ok(())
}

/// Estimate password entropy from character-class diversity and length.
///
/// The pool sums the sizes of the character classes present (lowercase,
/// uppercase, digits, everything else). Runs of a single character count
/// at most twice, so "aaaaaaaa" scores like "aa".
fn estimate_entropy(password: &str) -> f64 {
    let (mut lower, mut upper, mut digit, mut other) = (false, false, false, false);
    let mut effective_len = 0usize;
    let mut prev = None;
    let mut run = 0usize;

    for c in password.chars() {
        if c.is_ascii_lowercase() {
            lower = true;
        } else if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else {
            other = true;
        }

        if prev == Some(c) {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            effective_len += 1;
        }
    }

    let mut pool = 0u32;
    if lower {
        pool += 26;
    }
    if upper {
        pool += 26;
    }
    if digit {
        pool += 10;
    }
    if other {
        pool += 32;
    }

    if pool == 0 {
        return 0.0;
    }

    effective_len as f64 * f64::from(pool).log2()
}
