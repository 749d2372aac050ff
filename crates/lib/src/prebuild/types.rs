use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// What a prebuild run does with the resolved packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrebuildMode {
  /// Generate, build, merge and clean up every package.
  #[default]
  Build,
  /// Stop after generating the Xcode projects.
  SpecsOnly,
  /// Remove the `.xcframework` of every package.
  RemoveArtifacts,
  /// Remove the shared derived data directory.
  CleanCache,
}

impl PrebuildMode {
  /// Pick the mode from command-line flags. Cleaning the cache wins over
  /// removing artifacts, which wins over generating specs only.
  pub fn from_flags(remove_artifacts: bool, clean_cache: bool, generate_specs: bool) -> Self {
    if clean_cache {
      PrebuildMode::CleanCache
    } else if remove_artifacts {
      PrebuildMode::RemoveArtifacts
    } else if generate_specs {
      PrebuildMode::SpecsOnly
    } else {
      PrebuildMode::Build
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct PrebuildOptions {
  pub mode: PrebuildMode,
  /// Show xcodebuild output instead of passing `-quiet`.
  pub verbose: bool,
}

/// Result of processing a single package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
  pub package: String,
  pub project: String,
  /// `None` when only specs were generated.
  pub artifact: Option<PathBuf>,
  pub elapsed: Duration,
}

impl PackageReport {
  pub fn elapsed_secs(&self) -> String {
    format!("{:.2}s", self.elapsed.as_secs_f64())
  }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum PrebuildOutcome {
  CacheCleaned { path: PathBuf },
  ArtifactsRemoved { paths: Vec<PathBuf> },
  Prebuilt { packages: Vec<PackageReport> },
}
