//! Package lookup.
//!
//! A package is a directory under the packages root with a `package.json`.
//! Its iOS sources live in `<package>/ios`, next to a `<Pod>.podspec` whose
//! stem names the Xcode project generated for it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{PrebuildError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
  pub name: String,
  pub path: PathBuf,
  pub version: Option<String>,
  /// Stem of the podspec in `ios/`, if there is one.
  pub pod_name: Option<String>,
}

impl Package {
  pub fn ios_dir(&self) -> PathBuf {
    self.path.join("ios")
  }
}

/// Source of package metadata.
pub trait PackageRegistry {
  /// Look up a package. `Ok(None)` if no such package exists.
  fn package_by_name(&self, name: &str) -> Result<Option<Package>>;

  /// Names of the packages that may be prebuilt, in processing order.
  fn prebuildable_package_names(&self) -> Vec<String>;

  /// Whether `pkg` is listed as prebuildable and has a podspec.
  fn can_prebuild_package(&self, pkg: &Package) -> bool {
    pkg.pod_name.is_some() && self.prebuildable_package_names().contains(&pkg.name)
  }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
  name: Option<String>,
  version: Option<String>,
}

/// Registry reading packages from `<root>/<name>/package.json`.
#[derive(Debug, Clone)]
pub struct PackagesDir {
  root: PathBuf,
  prebuildable: Vec<String>,
}

impl PackagesDir {
  pub fn new(root: impl Into<PathBuf>, prebuildable: Vec<String>) -> Self {
    Self {
      root: root.into(),
      prebuildable,
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl PackageRegistry for PackagesDir {
  fn package_by_name(&self, name: &str) -> Result<Option<Package>> {
    let path = self.root.join(name);
    let manifest_path = path.join("package.json");
    let content = match std::fs::read_to_string(&manifest_path) {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        debug!(package = name, "no package.json");
        return Ok(None);
      }
      Err(e) => return Err(e.into()),
    };
    let manifest: PackageJson = serde_json::from_str(&content).map_err(|source| PrebuildError::Json {
      path: manifest_path.clone(),
      source,
    })?;

    let pod_name = find_pod_name(&path.join("ios"))?;

    Ok(Some(Package {
      name: manifest.name.unwrap_or_else(|| name.to_string()),
      version: manifest.version,
      pod_name,
      path,
    }))
  }

  fn prebuildable_package_names(&self) -> Vec<String> {
    self.prebuildable.clone()
  }
}

/// First `*.podspec` in `ios_dir` by file name.
fn find_pod_name(ios_dir: &Path) -> Result<Option<String>> {
  let entries = match std::fs::read_dir(ios_dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e.into()),
  };

  let mut pods = Vec::new();
  for entry in entries {
    let path = entry?.path();
    match (path.extension(), path.file_stem()) {
      (Some(ext), Some(stem)) if ext == "podspec" => pods.push(stem.to_string_lossy().into_owned()),
      _ => {}
    }
  }
  pods.sort();
  Ok(pods.into_iter().next())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::write_package;
  use tempfile::TempDir;

  #[test]
  fn reads_package_with_podspec() {
    let temp = TempDir::new().unwrap();
    let dir = write_package(temp.path(), "expo-foo", Some("EXFoo"));
    let registry = PackagesDir::new(temp.path(), vec!["expo-foo".to_string()]);

    let pkg = registry.package_by_name("expo-foo").unwrap().unwrap();

    assert_eq!(pkg.name, "expo-foo");
    assert_eq!(pkg.version.as_deref(), Some("1.2.3"));
    assert_eq!(pkg.pod_name.as_deref(), Some("EXFoo"));
    assert_eq!(pkg.path, dir);
    assert!(registry.can_prebuild_package(&pkg));
  }

  #[test]
  fn missing_package_is_none() {
    let temp = TempDir::new().unwrap();
    let registry = PackagesDir::new(temp.path(), vec![]);
    assert!(registry.package_by_name("expo-nope").unwrap().is_none());
  }

  #[test]
  fn malformed_package_json_is_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("expo-broken");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("package.json"), "{ not json").unwrap();
    let registry = PackagesDir::new(temp.path(), vec![]);

    let err = registry.package_by_name("expo-broken").unwrap_err();

    assert!(matches!(err, PrebuildError::Json { .. }));
  }

  #[test]
  fn cannot_prebuild_without_podspec_or_listing() {
    let temp = TempDir::new().unwrap();
    write_package(temp.path(), "expo-js-only", None);
    write_package(temp.path(), "expo-unlisted", Some("EXUnlisted"));
    let registry = PackagesDir::new(temp.path(), vec!["expo-js-only".to_string()]);

    let js_only = registry.package_by_name("expo-js-only").unwrap().unwrap();
    let unlisted = registry.package_by_name("expo-unlisted").unwrap().unwrap();

    assert!(js_only.pod_name.is_none());
    assert!(!registry.can_prebuild_package(&js_only));
    assert!(!registry.can_prebuild_package(&unlisted));
  }
}
