//! Prebuild configuration.
//!
//! All locations and tool names are carried in an explicit [`PrebuildConfig`]
//! value so that the orchestrator can be pointed at an isolated cache directory
//! and stand-in tools. Defaults can be overridden through environment variables.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::DEFAULT_PREBUILDABLE_PACKAGES;
use crate::error::Result;
use crate::platform::paths::shared_derived_data_dir;
use crate::util::fs::absolute_path;

pub const ENV_PACKAGES_DIR: &str = "PREBUILDER_PACKAGES_DIR";
pub const ENV_DERIVED_DATA: &str = "PREBUILDER_DERIVED_DATA";
pub const ENV_XCODEBUILD: &str = "PREBUILDER_XCODEBUILD";
pub const ENV_XCODEGEN: &str = "PREBUILDER_XCODEGEN";
pub const ENV_PACKAGES: &str = "PREBUILDER_PACKAGES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrebuildConfig {
  /// Directory containing one sub-directory per package.
  pub packages_dir: PathBuf,

  /// Shared derived data directory reused by every xcodebuild invocation.
  pub derived_data_dir: PathBuf,

  /// Program used to build frameworks and xcframeworks.
  pub xcodebuild: PathBuf,

  /// Program used to generate `.xcodeproj` files from specs.
  pub xcodegen: PathBuf,

  /// Names of the packages that can be prebuilt, in processing order.
  pub prebuildable: Vec<String>,
}

impl Default for PrebuildConfig {
  fn default() -> Self {
    Self {
      packages_dir: PathBuf::from("packages"),
      derived_data_dir: shared_derived_data_dir(),
      xcodebuild: PathBuf::from("xcodebuild"),
      xcodegen: PathBuf::from("xcodegen"),
      prebuildable: DEFAULT_PREBUILDABLE_PACKAGES.iter().map(|s| s.to_string()).collect(),
    }
  }
}

impl PrebuildConfig {
  /// Build the configuration from defaults and `PREBUILDER_*` environment variables.
  pub fn from_env() -> Self {
    let mut config = Self::default();

    if let Some(dir) = env_path(ENV_PACKAGES_DIR) {
      config.packages_dir = dir;
    }
    if let Some(dir) = env_path(ENV_DERIVED_DATA) {
      config.derived_data_dir = dir;
    }
    if let Some(program) = env_path(ENV_XCODEBUILD) {
      config.xcodebuild = program;
    }
    if let Some(program) = env_path(ENV_XCODEGEN) {
      config.xcodegen = program;
    }
    if let Ok(list) = std::env::var(ENV_PACKAGES) {
      config.prebuildable = parse_package_list(&list);
    }

    config
  }

  /// Make every directory and tool path absolute.
  ///
  /// The tools run with the project directory as their working directory, so
  /// relative paths passed to them would resolve against the wrong place.
  /// Bare tool names are kept as they are and looked up in `PATH`.
  pub fn resolve_paths(mut self) -> Result<Self> {
    self.packages_dir = absolute_path(&self.packages_dir)?;
    self.derived_data_dir = absolute_path(&self.derived_data_dir)?;
    self.xcodebuild = resolve_program(&self.xcodebuild)?;
    self.xcodegen = resolve_program(&self.xcodegen)?;
    Ok(self)
  }
}

fn resolve_program(program: &Path) -> Result<PathBuf> {
  if program.components().count() > 1 {
    Ok(absolute_path(program)?)
  } else {
    Ok(program.to_path_buf())
  }
}

fn env_path(name: &str) -> Option<PathBuf> {
  std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Split a comma-separated package list, dropping blank entries.
pub fn parse_package_list(list: &str) -> Vec<String> {
  list
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(String::from)
    .collect()
}
