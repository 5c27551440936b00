//! # Tombstone Testkit
//!
//! Test utilities for the tombstone crates.
//!
//! This crate provides:
//! - Temporary block directories with tombstone file helpers
//! - Property-based test generators using proptest
//! - Coverage and invariant checks for interval sets
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tombstone_testkit::prelude::*;
//!
//! #[test]
//! fn roundtrip() {
//!     let block = TempBlock::new();
//!     let stones = mem_tombstones_from_groups(&[&[(1, 10)]]);
//!     block.write(&stones).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
