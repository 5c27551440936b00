//! Verify command implementation.

use std::path::Path;
use tombstone_core::{read_file, tombstones_path, TombstoneError, TombstoneReader};

/// Outcome of verifying a tombstone file.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The block has no tombstone file.
    Missing,
    /// The file is intact.
    Valid {
        /// File size in bytes.
        bytes: u64,
        /// Number of intervals decoded.
        intervals: u64,
    },
    /// The stored checksum does not match the payload.
    Corrupted(String),
    /// The file is malformed or of an unsupported version.
    Malformed(String),
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying tombstones at {:?}", path);
    println!();

    match verify(path)? {
        Verdict::Missing => {
            println!("Tombstone file not found (block has no deletions)");
            Ok(())
        }
        Verdict::Valid { bytes, intervals } => {
            println!("  Size:      {} bytes", bytes);
            println!("  Intervals: {}", intervals);
            println!();
            println!("✓ Tombstone verification passed");
            Ok(())
        }
        Verdict::Corrupted(message) => {
            println!("  Integrity error: {}", message);
            println!();
            println!("✗ Tombstone verification failed");
            Err("Verification failed".into())
        }
        Verdict::Malformed(message) => {
            println!("  Format error: {}", message);
            println!();
            println!("✗ Tombstone verification failed");
            Err("Verification failed".into())
        }
    }
}

/// Verifies the tombstone file in `path`.
///
/// I/O errors are returned as errors; format and integrity problems are
/// reported as a [`Verdict`].
pub fn verify(path: &Path) -> Result<Verdict, TombstoneError> {
    if !tombstones_path(path).exists() {
        return Ok(Verdict::Missing);
    }

    match read_file(path) {
        Ok((stones, bytes)) => Ok(Verdict::Valid {
            bytes,
            intervals: stones.total(),
        }),
        Err(e @ TombstoneError::ChecksumMismatch { .. }) => Ok(Verdict::Corrupted(e.to_string())),
        Err(e @ TombstoneError::InvalidFormat { .. }) => Ok(Verdict::Malformed(e.to_string())),
        Err(e) => Err(e),
    }
}
