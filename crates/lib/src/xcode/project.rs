use std::path::{Path, PathBuf};

use crate::consts::{XCFRAMEWORK_EXT, XCODEPROJ_EXT};
use crate::error::{PrebuildError, Result};
use crate::packages::Package;
use crate::xcodegen::{ProjectSpec, Xcodegen};

/// A single Xcode project, identified by its `.xcodeproj` file.
///
/// The name always equals the descriptor's file stem; both are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XcodeProject {
  name: String,
  root_dir: PathBuf,
}

impl XcodeProject {
  /// Create a project from the path to an existing `.xcodeproj`.
  pub fn from_xcodeproj_path(xcodeproj_path: &Path) -> Result<Self> {
    if !xcodeproj_path.exists() {
      return Err(PrebuildError::NotFound {
        path: xcodeproj_path.to_path_buf(),
      });
    }
    Self::from_path_unchecked(xcodeproj_path)
  }

  /// Generate the `.xcodeproj` for `spec` inside `dir` and return it.
  pub async fn generate_from_spec(dir: &Path, spec: &ProjectSpec, xcodegen: &Xcodegen) -> Result<Self> {
    let xcodeproj_path = xcodegen.generate_project_from_spec(dir, spec).await?;
    Self::from_path_unchecked(&xcodeproj_path)
  }

  /// The project a package's prebuild is generated into, whether or not it
  /// has been generated yet. `None` if the package has no podspec.
  pub fn for_package(pkg: &Package) -> Option<Self> {
    let pod_name = pkg.pod_name.as_deref()?;
    Some(Self {
      name: pod_name.to_string(),
      root_dir: pkg.ios_dir(),
    })
  }

  fn from_path_unchecked(xcodeproj_path: &Path) -> Result<Self> {
    let not_found = || PrebuildError::NotFound {
      path: xcodeproj_path.to_path_buf(),
    };
    let name = xcodeproj_path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .ok_or_else(not_found)?;
    let root_dir = xcodeproj_path.parent().ok_or_else(not_found)?.to_path_buf();
    Ok(Self { name, root_dir })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Directory containing the `.xcodeproj`; xcodebuild runs from here.
  pub fn root_dir(&self) -> &Path {
    &self.root_dir
  }

  pub fn xcodeproj_path(&self) -> PathBuf {
    self.root_dir.join(self.xcodeproj_file_name())
  }

  pub fn xcodeproj_file_name(&self) -> String {
    format!("{}.{}", self.name, XCODEPROJ_EXT)
  }

  /// Where `build_xcframework` puts the universal artifact.
  pub fn xcframework_path(&self) -> PathBuf {
    self.root_dir.join(format!("{}.{}", self.name, XCFRAMEWORK_EXT))
  }

  pub fn spec_path(&self) -> PathBuf {
    Xcodegen::spec_path(&self.root_dir, &self.name)
  }
}
