//! # Tombstone Core
//!
//! Deletion records for a time-series storage block.
//!
//! A tombstone marks a time range of one series as deleted without
//! rewriting the block's data. This crate provides:
//! - [`Interval`] and [`Intervals`], the merge algebra for deleted ranges
//! - [`TombstoneReader`], read access independent of the backing store
//! - [`MemTombstones`], the mutable in-memory store
//! - [`encode`] / [`decode`] for the versioned payload
//! - [`write_file`] / [`read_file`] for checksummed, atomically replaced files
//!
//! ## Example
//!
//! ```rust
//! use tombstone_core::{read_file, write_file, Interval, MemTombstones, SeriesRef, TombstoneReader};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let stones = MemTombstones::new();
//! stones.add_interval(SeriesRef::new(1), [Interval::new(100, 200)]);
//!
//! let written = write_file(dir.path(), &stones).unwrap();
//! let (loaded, read) = read_file(dir.path()).unwrap();
//! assert_eq!(written, read);
//! assert_eq!(loaded.get(SeriesRef::new(1)).unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod error;
mod file;
mod interval;
mod memory;
mod reader;
mod types;

pub use codec::{decode, encode, FORMAT_V1, FORMAT_VERSION_SIZE};
pub use config::Config;
pub use error::{TombstoneError, TombstoneResult};
pub use file::{
    read_file, read_file_with_config, tombstones_path, write_file, write_file_with_config,
    CRC_SIZE, HEADER_SIZE, MAGIC_SIZE, MAGIC_TOMBSTONE, TOMBSTONES_FILENAME, TOMBSTONES_TEMP,
};
pub use interval::{Interval, Intervals};
pub use memory::{MemTombstones, Stone};
pub use reader::TombstoneReader;
pub use types::SeriesRef;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
