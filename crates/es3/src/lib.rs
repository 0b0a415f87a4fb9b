//! Decryption and normalisation of ES3 save files.
//!
//! An ES3 file is a 16-byte IV followed by AES-128-CBC ciphertext keyed with
//! PBKDF2-HMAC-SHA1(password, IV, 100 iterations). The plaintext is either a
//! gzip stream or raw text, possibly behind a binary header, holding a JSON
//! document whose values carry .NET `__type` wrappers.
//!
//! ```text
//! file bytes ─► EncryptedBlob::split ─► derive_es3_key ─► crypto::decrypt
//!            ─► compress::maybe_decompress ─► json::locate ─► json::sanitize
//!            ─► json::Normalizer ─► canonical JSON text
//! ```
//!
//! [`Es3Decoder`] runs the whole chain. Every call is self-contained: nothing
//! is cached between files.

pub mod blob;
pub mod compress;
pub mod crypto;
pub mod error;
pub mod json;
pub mod pipeline;

pub use blob::EncryptedBlob;
pub use crypto::DEFAULT_PASSWORD;
pub use json::{Normalizer, WrapperPolicy};
pub use pipeline::Es3Decoder;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_support;
