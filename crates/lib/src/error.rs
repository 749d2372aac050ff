//! Error types for prebuilder-lib

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating, building or cleaning prebuilds.
#[derive(Debug, Error)]
pub enum PrebuildError {
  /// An expected project descriptor or build output is missing.
  #[error("not found: {}", path.display())]
  NotFound { path: PathBuf },

  /// The external tool exited unsuccessfully.
  #[error("{tool} failed with exit code {code:?}")]
  BuildFailed { tool: String, code: Option<i32> },

  /// The external tool could not be started at all.
  #[error("failed to spawn {tool}: {source}")]
  Spawn { tool: String, source: std::io::Error },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid json at {}: {source}", path.display())]
  Json { path: PathBuf, source: serde_json::Error },

  /// The package cannot be turned into an Xcode project.
  #[error("package {name} cannot be prebuilt: {message}")]
  InvalidPackage { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, PrebuildError>;
