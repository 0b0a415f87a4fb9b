//! Transparent gzip decompression of decrypted payloads.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

/// The two-byte gzip magic number.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// The payload carried the gzip magic but could not be inflated.
#[derive(Debug, Error)]
#[error("corrupt gzip stream: {0}")]
pub struct DecompressError(#[from] std::io::Error);

/// Returns `true` if `data` starts with the gzip magic number.
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Inflate `data` if it is a gzip stream, otherwise hand it back untouched.
///
/// Concatenated gzip members are inflated in sequence.
///
/// # Errors
///
/// Returns [`DecompressError`] if `data` starts with the gzip magic but the
/// stream is corrupt or truncated.
pub fn maybe_decompress(data: &[u8]) -> Result<Cow<'_, [u8]>, DecompressError> {
    if !is_gzip(data) {
        return Ok(Cow::Borrowed(data));
    }

    let mut out = Vec::with_capacity(data.len() * 4);
    MultiGzDecoder::new(data).read_to_end(&mut out)?;
    debug!(compressed = data.len(), inflated = out.len(), "payload decompressed");
    Ok(Cow::Owned(out))
}
