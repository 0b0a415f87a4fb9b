//! Conversions from stage errors into the shared [`SaveError`] taxonomy.

use common::SaveError;

use crate::compress::DecompressError;
use crate::crypto::{CipherError, KdfError};
use crate::json::JsonError;

impl From<CipherError> for SaveError {
    fn from(err: CipherError) -> Self {
        SaveError::Crypto(err.to_string())
    }
}

impl From<KdfError> for SaveError {
    fn from(err: KdfError) -> Self {
        SaveError::Crypto(err.to_string())
    }
}

impl From<DecompressError> for SaveError {
    fn from(err: DecompressError) -> Self {
        SaveError::Decompression(err.to_string())
    }
}

impl From<JsonError> for SaveError {
    fn from(err: JsonError) -> Self {
        SaveError::JsonParse(err.to_string())
    }
}
