//! PBKDF2 key derivation with HMAC-SHA1 as the pseudorandom function.
//!
//! ES3 containers derive their AES-128 key from the password and the
//! container IV (used as the salt) with 100 iterations. The output must match
//! any standard PBKDF2-HMAC-SHA1 implementation byte for byte.

use hmac::Hmac;
use sha1::Sha1;
use thiserror::Error;

/// Byte length of the AES-128 key derived for an ES3 container.
pub const KEY_LEN: usize = 16;

/// PBKDF2 iteration count used by ES3 containers.
pub const ES3_ITERATIONS: u32 = 100;

/// Errors produced by key derivation.
#[derive(Debug, Error)]
pub enum KdfError {
    /// PBKDF2 needs at least one PRF application per block.
    #[error("iteration count must be at least 1")]
    ZeroIterations,

    /// A zero-length key was requested.
    #[error("derived key length must be at least 1 byte")]
    ZeroLength,

    /// The PRF could not be keyed with the password.
    #[error("password cannot key HMAC-SHA1")]
    InvalidPassword,
}

/// A derived ES3 key: exactly [`KEY_LEN`] bytes, recomputed per decrypt.
///
/// The buffer is overwritten with zeroes on drop and never printed.
#[derive(Clone)]
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive `key_len` bytes from `password` and `salt` with PBKDF2-HMAC-SHA1.
///
/// Blocks `T(1), T(2), ...` are concatenated and truncated to `key_len`, so a
/// 16-byte key is the first 16 bytes of the first 20-byte block.
///
/// # Errors
///
/// Returns [`KdfError::ZeroIterations`] or [`KdfError::ZeroLength`] for
/// degenerate parameters.
pub fn derive(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_len: usize,
) -> Result<Vec<u8>, KdfError> {
    if key_len == 0 {
        return Err(KdfError::ZeroLength);
    }
    let mut out = vec![0u8; key_len];
    fill(password, salt, iterations, &mut out)?;
    Ok(out)
}

/// Derive the AES-128 key for an ES3 container whose IV is `iv`.
///
/// # Errors
///
/// Only fails if the fixed parameters are rejected, which cannot happen for
/// [`ES3_ITERATIONS`] and [`KEY_LEN`].
pub fn derive_es3_key(password: &[u8], iv: &[u8]) -> Result<DerivedKey, KdfError> {
    let mut key = DerivedKey(Box::new([0u8; KEY_LEN]));
    fill(password, iv, ES3_ITERATIONS, key.0.as_mut_slice())?;
    Ok(key)
}

fn fill(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<(), KdfError> {
    if iterations == 0 {
        return Err(KdfError::ZeroIterations);
    }
    pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, iterations, out)
        .map_err(|_| KdfError::InvalidPassword)
}
