//! Shared utilities.
//!
//! Filesystem helpers used by the cleanup operations, plus test helpers.

pub mod fs;

#[cfg(test)]
pub mod testutil;
