//! Structured logging for the save editor.
//!
//! Logs are JSON lines on stderr so that stdout carries only decoded output.
//! Log level is configurable via `LOG_LEVEL` (default: `info`), and `RUST_LOG`
//! overrides it when set.
//!
//! Save contents, passwords and derived keys never appear in log fields.

pub mod init;

pub use init::init;
