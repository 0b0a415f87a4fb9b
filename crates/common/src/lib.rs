//! Common types and errors shared across the ES3 save editor crates.

pub mod error;
pub mod protocol;

pub use error::SaveError;
