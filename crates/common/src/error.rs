//! Error taxonomy shared by the decode pipeline and the application layer.

use thiserror::Error;

/// Top-level error for every save-file operation.
///
/// Each variant maps to a stable machine-readable code returned to the UI:
/// - [`SaveError::Io`] → `io_error`
/// - [`SaveError::Crypto`] → `crypto_error`
/// - [`SaveError::Decompression`] → `decompression_error`
/// - [`SaveError::JsonParse`] → `json_parse_error`
/// - [`SaveError::NotImplemented`] → `not_implemented`
/// - [`SaveError::ProfileNotFound`] → `profile_not_found`
/// - [`SaveError::Lookup`] → `lookup_failed`
#[derive(Debug, Error)]
pub enum SaveError {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The blob is truncated, misaligned, or carries an invalid padding length.
    #[error("error decrypting file: {0}")]
    Crypto(String),

    /// The payload looked gzip-compressed but the stream is corrupt.
    #[error("error decompressing data: {0}")]
    Decompression(String),

    /// No valid JSON object could be recovered from the payload.
    #[error("error parsing JSON: {0}")]
    JsonParse(String),

    /// The requested operation has no implementation yet.
    #[error("{0} functionality not yet implemented")]
    NotImplemented(String),

    /// The Steam profile lookup returned no `steamID64`.
    #[error("no player found with Steam ID: {0}")]
    ProfileNotFound(String),

    /// The Steam profile could not be fetched or parsed.
    #[error("failed to look up Steam profile: {0}")]
    Lookup(String),
}

impl SaveError {
    /// Returns the machine-readable code reported to the UI for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SaveError::Io { .. } => "io_error",
            SaveError::Crypto(_) => "crypto_error",
            SaveError::Decompression(_) => "decompression_error",
            SaveError::JsonParse(_) => "json_parse_error",
            SaveError::NotImplemented(_) => "not_implemented",
            SaveError::ProfileNotFound(_) => "profile_not_found",
            SaveError::Lookup(_) => "lookup_failed",
        }
    }
}
