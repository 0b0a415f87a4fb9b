//! ES3 container cryptography: PBKDF2-HMAC-SHA1 key derivation and
//! AES-128-CBC decryption.
//!
//! Decryption only. This crate never produces ciphertext outside of tests.
//!
//! # Key material
//!
//! Derived keys live for one decrypt call and are zeroed on drop. Neither the
//! password nor the key may appear in any log field.

pub mod cipher;
pub mod kdf;

pub use cipher::{decrypt, CipherError, BLOCK_LEN, IV_LEN};
pub use kdf::{derive, derive_es3_key, DerivedKey, KdfError, ES3_ITERATIONS, KEY_LEN};

/// Password the game client has always used for its ES3 saves.
///
/// Callers pass it explicitly; nothing in the decrypt path falls back to it.
pub const DEFAULT_PASSWORD: &str = "Why would you want to cheat?... :o It's no fun. :') :'D";
