//! prebuilder-lib: Prebuilt iOS frameworks for monorepo packages
//!
//! This crate drives the external Apple tooling to turn a package's iOS
//! sources into a distributable `.xcframework`:
//! - `packages`: lookup of packages and which of them can be prebuilt
//! - `xcodegen`: project specs and `.xcodeproj` generation
//! - `xcode`: the project handle, `xcodebuild` invocation and artifact cleanup
//! - `prebuild`: the per-package orchestration tying these together

pub mod config;
pub mod consts;
pub mod error;
pub mod packages;
pub mod platform;
pub mod prebuild;
pub mod process;
pub mod util;
pub mod xcode;
pub mod xcodegen;

pub use error::{PrebuildError, Result};
