//! Property-based tests for the decode pipeline.
//!
//! - Decrypting a container built by the reference encoder returns the
//!   original plaintext for any length, IV and password.
//! - Non-gzip payloads pass through decompression byte for byte.
//! - Inputs shorter than an IV are rejected as crypto errors.
//! - Locating is idempotent and sanitizing never fails.

use proptest::prelude::*;

use crate::compress::{maybe_decompress, GZIP_MAGIC};
use crate::crypto::IV_LEN;
use crate::json::{locate, sanitize};
use crate::test_support::{encrypt_es3, gzip};
use crate::Es3Decoder;

proptest! {
    /// decrypt(encrypt(p)) == p for arbitrary plaintext, IV and password.
    #[test]
    fn decrypt_round_trip(
        plaintext in prop::collection::vec(any::<u8>(), 0..600),
        iv in prop::array::uniform16(any::<u8>()),
        password in "[ -~]{1,40}",
    ) {
        // Keep the payload from looking like gzip so it passes through as-is.
        prop_assume!(!plaintext.starts_with(&GZIP_MAGIC));
        let file = encrypt_es3(&plaintext, password.as_bytes(), &iv);
        let decrypted = Es3Decoder::new(password).decrypt(&file).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    /// Gzip payloads come back inflated.
    #[test]
    fn decrypt_inflates_gzip(
        plaintext in prop::collection::vec(any::<u8>(), 0..600),
        iv in prop::array::uniform16(any::<u8>()),
    ) {
        let file = encrypt_es3(&gzip(&plaintext), b"pw", &iv);
        let decrypted = Es3Decoder::new("pw").decrypt(&file).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    /// Anything shorter than an IV is a crypto error.
    #[test]
    fn short_input_rejected(bytes in prop::collection::vec(any::<u8>(), 0..IV_LEN)) {
        let err = Es3Decoder::default().decode(&bytes).unwrap_err();
        prop_assert_eq!(err.code(), "crypto_error");
    }

    /// Buffers without the gzip magic are returned unchanged.
    #[test]
    fn non_gzip_passes_through(data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assume!(!data.starts_with(&GZIP_MAGIC));
        let out = maybe_decompress(&data).unwrap();
        prop_assert_eq!(out.as_ref(), data.as_slice());
    }

    /// Data that already starts with `{` is returned unchanged.
    #[test]
    fn locate_is_idempotent(rest in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut data = vec![b'{'];
        data.extend(rest);
        prop_assert_eq!(locate(&data), data.as_slice());
        prop_assert_eq!(locate(locate(&data)), locate(&data));
    }

    /// Sanitizing arbitrary bytes never panics and always yields an object
    /// prefix.
    #[test]
    fn sanitize_never_fails(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let out = sanitize(&data);
        prop_assert_eq!(out.first(), Some(&b'{'));
    }
}
