//! Generation of `.xcodeproj` files with xcodegen.

mod spec;

pub use spec::*;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::{SPEC_FILE_SUFFIX, XCODEPROJ_EXT};
use crate::error::{PrebuildError, Result};
use crate::process::{StdoutReplay, run_tool};
use crate::xcode::StdOutput;

#[derive(Debug, Clone)]
pub struct Xcodegen {
  program: PathBuf,
  replay: StdoutReplay,
}

impl Xcodegen {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      replay: StdoutReplay::default(),
    }
  }

  pub fn with_stdout_replay(mut self, replay: StdoutReplay) -> Self {
    self.replay = replay;
    self
  }

  /// `<dir>/<name>.spec.json`
  pub fn spec_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, SPEC_FILE_SUFFIX))
  }

  /// Write `spec` into `dir`, run xcodegen on it and return the path of the
  /// generated `.xcodeproj`.
  pub async fn generate_project_from_spec(&self, dir: &Path, spec: &ProjectSpec) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let spec_path = Self::spec_path(dir, &spec.name);
    let json = serde_json::to_string_pretty(spec).map_err(|source| PrebuildError::Json {
      path: spec_path.clone(),
      source,
    })?;
    tokio::fs::write(&spec_path, json).await?;

    info!(spec = %spec_path.display(), "generating xcode project");

    let args = vec![
      "--quiet".to_string(),
      "--spec".to_string(),
      spec_path.to_string_lossy().into_owned(),
      "--project".to_string(),
      dir.to_string_lossy().into_owned(),
    ];
    run_tool(&self.program, &args, dir, StdOutput::Stderr, &self.replay).await?;

    let xcodeproj_path = dir.join(format!("{}.{}", spec.name, XCODEPROJ_EXT));
    if !xcodeproj_path.exists() {
      return Err(PrebuildError::NotFound { path: xcodeproj_path });
    }
    Ok(xcodeproj_path)
  }
}
