//! AES-128-CBC decryption of the ES3 ciphertext followed by PKCS7 unpadding.
//!
//! **Padding check:** only the final byte is validated (it must lie in
//! `1..=16`). The bytes it claims as padding are not compared against it, so
//! saves written by encoders with sloppy padding still open.

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, KeyIvInit};
use thiserror::Error;
use tracing::debug;

use super::kdf::{KdfError, KEY_LEN};

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Byte length of the IV that prefixes every ES3 container.
pub const IV_LEN: usize = 16;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The container is too short to hold an IV.
    #[error("encrypted data too short: {0} bytes, need at least {IV_LEN}")]
    BlobTooShort(usize),

    /// The ciphertext is empty or not block-aligned.
    #[error("ciphertext length {0} is not a positive multiple of {BLOCK_LEN}")]
    InvalidCiphertextLength(usize),

    /// The key or IV was rejected by the cipher.
    #[error("invalid key or IV length")]
    InvalidKeyLength,

    /// The final plaintext byte is not a PKCS7 padding length.
    #[error("invalid padding: length byte {0}")]
    InvalidPadding(u8),

    /// The key could not be derived.
    #[error("key derivation failed: {0}")]
    Kdf(#[from] KdfError),
}

/// Decrypt `ciphertext` with AES-128-CBC and strip its PKCS7 padding.
///
/// # Errors
///
/// Returns [`CipherError::InvalidCiphertextLength`] if `ciphertext` is empty or
/// not a multiple of [`BLOCK_LEN`], and [`CipherError::InvalidPadding`] if the
/// last decrypted byte is `0` or greater than [`BLOCK_LEN`].
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, CipherError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::InvalidCiphertextLength(ciphertext.len()));
    }

    let mut buf = ciphertext.to_vec();
    Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength)?
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| CipherError::InvalidCiphertextLength(ciphertext.len()))?;

    let len = unpadded_len(&buf)?;
    debug!(
        ciphertext_len = ciphertext.len(),
        padding_len = buf.len() - len,
        "ciphertext decrypted"
    );
    buf.truncate(len);
    Ok(buf)
}

fn unpadded_len(plaintext: &[u8]) -> Result<usize, CipherError> {
    let padding = *plaintext.last().ok_or(CipherError::InvalidPadding(0))?;
    if padding == 0 || usize::from(padding) > BLOCK_LEN {
        return Err(CipherError::InvalidPadding(padding));
    }
    plaintext
        .len()
        .checked_sub(usize::from(padding))
        .ok_or(CipherError::InvalidPadding(padding))
}
