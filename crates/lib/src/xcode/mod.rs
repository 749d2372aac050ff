//! Xcode projects and the `xcodebuild` tool.
//!
//! - [`XcodeProject`] - handle to a `.xcodeproj` and the paths derived from it
//! - [`Xcodebuild`] - builds frameworks per [`Flavor`] and merges them into an `.xcframework`
//! - [`DerivedData`] - layout of the shared build cache
//! - [`artifacts`] - removal of artifacts, caches and temporary files

pub mod artifacts;
mod derived_data;
mod project;
mod types;
mod xcodebuild;

pub use derived_data::DerivedData;
pub use project::XcodeProject;
pub use types::*;
pub use xcodebuild::{Xcodebuild, spread_args, xcodebuild_args};
