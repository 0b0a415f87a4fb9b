//! The end-to-end decode chain for one ES3 file.

use std::borrow::Cow;

use common::SaveError;
use tracing::{debug, info};

use crate::blob::EncryptedBlob;
use crate::compress;
use crate::crypto::{self, derive_es3_key, DEFAULT_PASSWORD};
use crate::json::{self, JsonError, Normalizer, WrapperPolicy};

/// Decrypts ES3 containers and turns their payload into plain JSON.
///
/// Holds only configuration; every call derives its own key and allocates its
/// own buffers.
#[derive(Clone)]
pub struct Es3Decoder {
    password: Vec<u8>,
    normalizer: Normalizer,
}

impl Es3Decoder {
    /// Create a decoder for saves encrypted with `password`.
    pub fn new(password: impl Into<Vec<u8>>) -> Self {
        Self {
            password: password.into(),
            normalizer: Normalizer::default(),
        }
    }

    /// Choose how wrappers without a `value` are handled.
    pub fn with_wrapper_policy(mut self, policy: WrapperPolicy) -> Self {
        self.normalizer = Normalizer::new(policy);
        self
    }

    /// Decrypt `bytes` and inflate the payload if it is gzip-compressed.
    ///
    /// # Errors
    ///
    /// - [`SaveError::Crypto`] if the file is shorter than an IV, the
    ///   ciphertext is not block-aligned, or the padding length is invalid.
    /// - [`SaveError::Decompression`] if a gzip payload is corrupt.
    pub fn decrypt(&self, bytes: &[u8]) -> Result<Vec<u8>, SaveError> {
        let blob = EncryptedBlob::split(bytes)?;
        let key = derive_es3_key(&self.password, blob.iv)?;
        let payload = crypto::decrypt(blob.ciphertext, key.as_bytes(), blob.iv)?;

        let inflated = match compress::maybe_decompress(&payload)? {
            Cow::Owned(inflated) => Some(inflated),
            Cow::Borrowed(_) => None,
        };
        Ok(inflated.unwrap_or(payload))
    }

    /// Run the full chain on `bytes` and return canonical JSON text.
    ///
    /// # Errors
    ///
    /// Everything [`Es3Decoder::decrypt`] returns, plus
    /// [`SaveError::JsonParse`] if the payload is empty or holds no parsable
    /// JSON object.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, SaveError> {
        let payload = self.decrypt(bytes)?;

        let located = json::locate(&payload);
        if located.is_empty() {
            return Err(JsonError::NoPayload.into());
        }
        debug!(
            payload_len = payload.len(),
            header_len = payload.len() - located.len(),
            "JSON located"
        );

        let cleaned = json::sanitize(located);
        let text = self.normalizer.normalize(&cleaned)?;
        info!(
            file_len = bytes.len(),
            json_len = text.len(),
            "save decoded"
        );
        Ok(text)
    }
}

impl Default for Es3Decoder {
    /// A decoder using [`DEFAULT_PASSWORD`].
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD)
    }
}

impl std::fmt::Debug for Es3Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es3Decoder")
            .field("password", &"[REDACTED]")
            .field("policy", &self.normalizer.policy())
            .finish()
    }
}
