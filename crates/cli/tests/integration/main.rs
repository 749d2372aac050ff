//! CLI integration tests running prebuilds against stand-in Apple tools.

#![cfg(unix)]

mod common;
mod prebuild_tests;
