//! Tombstone file persistence.
//!
//! ## Format
//!
//! ```text
//! [4 bytes]  magic 0x0130BA30 (big-endian)
//! [N bytes]  payload (format version + triples, see `codec`)
//! [4 bytes]  CRC32-C over payload[1..] (big-endian)
//! ```
//!
//! The checksum skips the format version byte, so a version mismatch is
//! reported as a format error rather than as corruption.
//!
//! ## Crash Safety
//!
//! Files are never modified in place. A new file is written next to the
//! canonical one, synced, and renamed over it. Until the rename succeeds
//! the previous file is untouched and the temporary file is removed on
//! every error path.

use crate::codec::{decode, encode, FORMAT_VERSION_SIZE};
use crate::config::Config;
use crate::error::{TombstoneError, TombstoneResult};
use crate::memory::MemTombstones;
use crate::reader::TombstoneReader;
use crc::{Crc, CRC_32_ISCSI};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the tombstone file inside a block directory.
pub const TOMBSTONES_FILENAME: &str = "tombstones";

/// Name of the temporary file used while replacing the tombstone file.
pub const TOMBSTONES_TEMP: &str = "tombstones.tmp";

/// Magic number at the head of a tombstone file.
pub const MAGIC_TOMBSTONE: u32 = 0x0130_BA30;

/// Size of the magic number.
pub const MAGIC_SIZE: usize = 4;

/// Size of the magic number plus the format version.
pub const HEADER_SIZE: usize = MAGIC_SIZE + FORMAT_VERSION_SIZE;

/// Size of the trailing checksum.
pub const CRC_SIZE: usize = 4;

const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

/// Returns the path of the tombstone file in `dir`.
#[must_use]
pub fn tombstones_path(dir: &Path) -> PathBuf {
    dir.join(TOMBSTONES_FILENAME)
}

/// Writes the tombstones of `reader` to `dir` with the default config.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// See [`write_file_with_config`].
pub fn write_file(dir: &Path, reader: &dyn TombstoneReader) -> TombstoneResult<u64> {
    write_file_with_config(dir, reader, &Config::default())
}

/// Writes the tombstones of `reader` to `dir` atomically.
///
/// Uses write-then-rename for crash safety:
/// 1. Write magic, payload and checksum to a temporary file
/// 2. Sync the temporary file to disk
/// 3. Rename it over the tombstone file
/// 4. Optionally fsync the directory so the rename is durable
///
/// Returns the number of bytes written, which equals the new file's length.
///
/// # Errors
///
/// Returns an error if encoding fails or on any I/O failure. When the
/// error happens before the rename, the existing file is left untouched.
pub fn write_file_with_config(
    dir: &Path,
    reader: &dyn TombstoneReader,
    config: &Config,
) -> TombstoneResult<u64> {
    let path = tombstones_path(dir);
    let temp_path = dir.join(TOMBSTONES_TEMP);

    let payload = encode(reader)?;
    let crc = CASTAGNOLI.checksum(&payload[FORMAT_VERSION_SIZE..]);

    let mut buf = Vec::with_capacity(MAGIC_SIZE + payload.len() + CRC_SIZE);
    buf.extend_from_slice(&MAGIC_TOMBSTONE.to_be_bytes());
    buf.extend_from_slice(&payload);
    buf.extend_from_slice(&crc.to_be_bytes());

    let temp = TempFile::new(temp_path);
    {
        let mut file = File::create(temp.path())?;
        file.write_all(&buf)?;
        file.sync_all()?;
    }

    fs::rename(temp.path(), &path)?;
    temp.persisted();

    if config.sync_directory {
        sync_directory(dir)?;
    }

    debug!(path = %path.display(), bytes = buf.len(), "wrote tombstones");
    Ok(buf.len() as u64)
}

/// Reads the tombstone file in `dir` with the default config.
///
/// # Errors
///
/// See [`read_file_with_config`].
pub fn read_file(dir: &Path) -> TombstoneResult<(MemTombstones, u64)> {
    read_file_with_config(dir, &Config::default())
}

/// Reads and validates the tombstone file in `dir`.
///
/// A missing file is not an error: it yields an empty store and zero
/// bytes read. Returns the store and the number of bytes read.
///
/// # Errors
///
/// - [`TombstoneError::InvalidFormat`] if the file is undersized, larger
///   than `config.max_file_size`, has a bad magic number or a malformed payload
/// - [`TombstoneError::ChecksumMismatch`] if the payload is corrupted
/// - [`TombstoneError::Io`] on file system errors
pub fn read_file_with_config(
    dir: &Path,
    config: &Config,
) -> TombstoneResult<(MemTombstones, u64)> {
    let path = tombstones_path(dir);

    let len = match fs::metadata(&path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok((MemTombstones::new(), 0));
        }
        Err(e) => return Err(e.into()),
    };
    if len > config.max_file_size {
        return Err(TombstoneError::invalid_format(format!(
            "tombstone file is {len} bytes, limit is {}",
            config.max_file_size
        )));
    }

    let data = fs::read(&path)?;
    if data.len() < HEADER_SIZE + CRC_SIZE {
        return Err(TombstoneError::invalid_format(format!(
            "tombstone file too small: {} bytes",
            data.len()
        )));
    }

    let magic = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if magic != MAGIC_TOMBSTONE {
        return Err(TombstoneError::invalid_format(format!(
            "invalid magic number {magic:#010x}"
        )));
    }

    let crc_offset = data.len() - CRC_SIZE;
    let payload = &data[MAGIC_SIZE..crc_offset];
    let expected = u32::from_be_bytes([
        data[crc_offset],
        data[crc_offset + 1],
        data[crc_offset + 2],
        data[crc_offset + 3],
    ]);
    let actual = CASTAGNOLI.checksum(&payload[FORMAT_VERSION_SIZE..]);
    if expected != actual {
        return Err(TombstoneError::ChecksumMismatch { expected, actual });
    }

    let stones = decode(payload)?;
    debug!(path = %path.display(), bytes = data.len(), total = stones.total(), "read tombstones");
    Ok((stones, data.len() as u64))
}

/// Removes the temporary file on drop unless it was renamed into place.
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            persisted: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persisted(mut self) {
        self.persisted = true;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove temporary tombstone file");
            }
        }
    }
}

/// Syncs `dir` so that a rename inside it is durable.
///
/// Windows NTFS journals metadata updates and does not support opening a
/// directory for fsync, so this is a no-op there.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> TombstoneResult<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> TombstoneResult<()> {
    Ok(())
}
