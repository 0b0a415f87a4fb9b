//! Splitting a raw ES3 file into its IV and ciphertext.

use crate::crypto::{CipherError, IV_LEN};

/// A borrowed view of an ES3 container: a 16-byte IV followed by ciphertext.
#[derive(Debug, Clone, Copy)]
pub struct EncryptedBlob<'a> {
    /// Initialisation vector, also the PBKDF2 salt.
    pub iv: &'a [u8; IV_LEN],
    /// AES-128-CBC ciphertext; alignment is checked by the cipher.
    pub ciphertext: &'a [u8],
}

impl<'a> EncryptedBlob<'a> {
    /// Split raw file bytes into IV and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::BlobTooShort`] if `bytes` cannot hold an IV.
    pub fn split(bytes: &'a [u8]) -> Result<Self, CipherError> {
        let (iv, ciphertext) = bytes
            .split_first_chunk::<IV_LEN>()
            .ok_or(CipherError::BlobTooShort(bytes.len()))?;
        Ok(Self { iv, ciphertext })
    }
}
