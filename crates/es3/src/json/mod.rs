//! Recovering a plain JSON document from a decrypted ES3 payload.
//!
//! Three passes, in pipeline order:
//!
//! 1. [`locate`] skips any binary header in front of the first `{`.
//! 2. [`sanitize`] keeps the first balanced top-level object and drops
//!    trailing commas. It never fails.
//! 3. [`Normalizer`] parses the result (retrying on the first balanced object
//!    if needed) and strips .NET `__type` wrappers.
//!
//! All brace counting goes through [`scanner`], which ignores braces inside
//! string literals.

pub mod locate;
pub mod normalize;
pub mod sanitize;
pub mod scanner;

pub use locate::locate;
pub use normalize::{normalize, Normalizer, UnknownPolicy, WrapperPolicy};
pub use sanitize::sanitize;

use thiserror::Error;

/// Errors produced while recovering JSON.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The payload was empty once the header was skipped.
    #[error("no JSON data found in file")]
    NoPayload,

    /// Neither the direct parse nor the recovery pass yielded a JSON object.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}
