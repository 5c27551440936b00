//! Shared helpers for the tombstone benchmarks.

pub mod utils;
