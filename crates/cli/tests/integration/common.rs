//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

// Script bodies shared with the library's unit tests.
const FAKE_XCODEBUILD: &str = include_str!("../../../lib/tests/fixtures/xcodebuild.sh");
const FAKE_XCODEGEN: &str = include_str!("../../../lib/tests/fixtures/xcodegen.sh");

/// Isolated test environment.
///
/// Each test gets its own packages directory, derived data directory and
/// stand-in tools.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_tool("xcodebuild", &format!("#!/bin/sh\n{}", FAKE_XCODEBUILD));
    env.write_tool("xcodegen", &format!("#!/bin/sh\n{}", FAKE_XCODEGEN));
    env
  }

  /// Replace a tool with a custom script body.
  pub fn write_tool(&self, name: &str, script: &str) {
    let path = self.tools_path().join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Add a package with an iOS podspec.
  pub fn add_package(&self, name: &str, pod: &str) {
    let dir = self.packages_path().join(name);
    std::fs::create_dir_all(dir.join("ios")).unwrap();
    std::fs::write(dir.join("package.json"), format!(r#"{{ "name": "{}" }}"#, name)).unwrap();
    std::fs::write(dir.join("ios").join(format!("{}.podspec", pod)), "").unwrap();
  }

  pub fn ios_path(&self, package: &str) -> PathBuf {
    self.packages_path().join(package).join("ios")
  }

  pub fn packages_path(&self) -> PathBuf {
    self.dir("packages")
  }

  pub fn derived_data_path(&self) -> PathBuf {
    self.temp.path().join("tmp").join("DerivedData")
  }

  pub fn tools_path(&self) -> PathBuf {
    self.dir("tools")
  }

  /// Invocations recorded by the stand-in xcodebuild.
  pub fn xcodebuild_invocations(&self) -> Vec<String> {
    std::fs::read_to_string(self.tools_path().join("xcodebuild.log"))
      .unwrap_or_default()
      .lines()
      .map(String::from)
      .collect()
  }

  fn dir(&self, name: &str) -> PathBuf {
    let p = self.temp.path().join(name);
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Get a pre-configured Command for the prebuilder binary.
  ///
  /// `prebuildable` becomes the `PREBUILDER_PACKAGES` list.
  pub fn prebuilder_cmd(&self, prebuildable: &[&str]) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("prebuilder");
    cmd.env("PREBUILDER_PACKAGES_DIR", self.packages_path());
    cmd.env("PREBUILDER_DERIVED_DATA", self.derived_data_path());
    cmd.env("PREBUILDER_XCODEBUILD", self.tools_path().join("xcodebuild"));
    cmd.env("PREBUILDER_XCODEGEN", self.tools_path().join("xcodegen"));
    cmd.env("PREBUILDER_PACKAGES", prebuildable.join(","));
    cmd
  }
}
