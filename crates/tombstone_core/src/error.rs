//! Error types for tombstone operations.

use std::io;
use thiserror::Error;

/// Result type for tombstone operations.
pub type TombstoneResult<T> = Result<T, TombstoneError>;

/// Errors that can occur while encoding, decoding or persisting tombstones.
///
/// Format and integrity failures are kept apart: a [`TombstoneError::InvalidFormat`]
/// points at a version or code mismatch, while a
/// [`TombstoneError::ChecksumMismatch`] points at media or write-path corruption.
#[derive(Debug, Error)]
pub enum TombstoneError {
    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The tombstone bytes are malformed or of an unknown version.
    #[error("invalid tombstone format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// The stored checksum does not match the payload.
    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the file.
        expected: u32,
        /// Checksum computed over the payload.
        actual: u32,
    },

    /// An iteration callback asked to stop.
    #[error("iteration aborted: {message}")]
    Iteration {
        /// Reason reported by the callback.
        message: String,
    },
}

impl TombstoneError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an iteration error.
    pub fn iteration(message: impl Into<String>) -> Self {
        Self::Iteration {
            message: message.into(),
        }
    }

    /// Returns true if this error reports corrupted bytes rather than a
    /// malformed or unsupported file.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}
