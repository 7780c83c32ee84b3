//! Error types for the file service core.

use thiserror::Error;

/// Crate-wide error type covering every operation failure mode.
///
/// Expected conditions (`NotFound`, `AlreadyExists`) are distinct variants so
/// callers can branch on them without inspecting I/O error kinds. Unexpected
/// filesystem faults are carried as [`Error::Io`] with the original message
/// preserved for diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested path escapes the home directory sandbox.
    ///
    /// The attempted path is deliberately not included in the message; the
    /// caller only learns that access was denied.
    #[error("access denied: path is outside the home directory")]
    AccessDenied,

    /// The target does not exist but the operation requires it to.
    #[error("not found: {0}")]
    NotFound(String),

    /// The target already exists but the operation requires it to be absent.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Declared upload size exceeds the configured limit.
    #[error("file too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Declared size of the upload.
        size: u64,
        /// Configured maximum size.
        limit: u64,
    },

    /// A search query failed validation.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    /// Unexpected underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
