//! Crate-wide error type.
//!
//! Every recoverable failure in the capture layer maps here. Resource
//! exhaustion while growing the handle cache is deliberately non-fatal:
//! the caller logs it and keeps processing the intercepted call, since a
//! missed cache entry only suppresses a later notification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The handle cache could not grow for a new record.
    #[error("handle cache allocation failed")]
    OutOfMemory,

    /// A format specification contained an unknown type tag.
    #[error("bad format specification: {0}")]
    BadFormat(String),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}
