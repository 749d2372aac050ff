//! Layout of the shared xcodebuild derived data directory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::consts::FRAMEWORK_EXT;
use crate::error::Result;
use crate::util::fs::remove_path;
use crate::xcode::Flavor;

/// Shared derived data directory reused across builds of all projects.
///
/// The directory is assumed to be owned by a single invocation at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedData {
  root: PathBuf,
}

impl DerivedData {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// `<root>/Build/Products`, where `.framework` files are picked from.
  pub fn products_dir(&self) -> PathBuf {
    self.root.join("Build").join("Products")
  }

  /// `<root>/Build/Intermediates.noindex/<project>.build`
  pub fn intermediates_dir(&self, project_name: &str) -> PathBuf {
    self
      .root
      .join("Build")
      .join("Intermediates.noindex")
      .join(format!("{}.build", project_name))
  }

  /// `<products>/<configuration>-<sdk>/<target>.framework`
  pub fn framework_path(&self, target: &str, flavor: &Flavor) -> PathBuf {
    self
      .products_dir()
      .join(flavor.products_dir_name())
      .join(format!("{}.{}", target, FRAMEWORK_EXT))
  }

  /// Delete the whole directory. Succeeds if it is already absent.
  pub async fn clean(&self) -> Result<()> {
    if remove_path(&self.root).await? {
      info!(path = %self.root.display(), "removed shared derived data");
    }
    Ok(())
  }
}
