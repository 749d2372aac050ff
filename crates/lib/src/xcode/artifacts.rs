//! Removal of prebuild artifacts and the temporary files left by a build.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::Result;
use crate::util::fs::remove_path;
use crate::xcode::{DerivedData, XcodeProject};

/// Remove the project's `.xcframework`. Succeeds if there is none.
pub async fn remove_xcframework(project: &XcodeProject) -> Result<PathBuf> {
  let path = project.xcframework_path();
  if remove_path(&path).await? {
    info!(path = %path.display(), "removed xcframework");
  }
  Ok(path)
}

/// Remove the whole shared derived data directory.
pub async fn clean_build_cache(derived_data: &DerivedData) -> Result<()> {
  derived_data.clean().await
}

/// Remove the generated spec and `.xcodeproj` of one project along with its
/// intermediates in the derived data directory.
///
/// Products and other projects' intermediates are left in place so later
/// builds can reuse them.
pub async fn clean_temporary_files(project: &XcodeProject, derived_data: &DerivedData) -> Result<()> {
  let paths = [
    project.xcodeproj_path(),
    project.spec_path(),
    derived_data.intermediates_dir(project.name()),
  ];
  for path in &paths {
    if remove_path(path).await? {
      debug!(path = %path.display(), "removed temporary file");
    }
  }
  Ok(())
}
