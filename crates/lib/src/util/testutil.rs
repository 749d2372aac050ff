//! Test utilities for prebuilder-lib.
//!
//! The Apple tools are not available in tests, so these helpers write small
//! POSIX shell scripts that stand in for them. Each script appends its argv to
//! `<script>.log` (one invocation per line) and creates the files the real
//! tool would create. The script bodies live in `tests/fixtures` and are
//! shared with the CLI integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::process::StdoutReplay;

/// Stands in for `xcodebuild`: `build` creates
/// `<derivedData>/Build/Products/<conf>-<sdk>/<target>.framework` with a binary,
/// `Headers` and `_CodeSignature`, plus the project's intermediates directory.
/// `-create-xcframework` copies each framework into its own slice of the output.
pub const FAKE_XCODEBUILD: &str = include_str!("../../tests/fixtures/xcodebuild.sh");

/// Stands in for `xcodegen`: creates `<project>/<name>.xcodeproj` for
/// `--spec <dir>/<name>.spec.json --project <project>`.
pub const FAKE_XCODEGEN: &str = include_str!("../../tests/fixtures/xcodegen.sh");

/// Write an executable shell script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join(name);
  std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Invocations recorded by a script written with [`write_script`].
pub fn script_invocations(script: &Path) -> Vec<String> {
  let log = script.with_file_name(format!(
    "{}.log",
    script.file_name().unwrap().to_string_lossy()
  ));
  std::fs::read_to_string(log)
    .unwrap_or_default()
    .lines()
    .map(String::from)
    .collect()
}

/// A replay sink backed by an in-memory buffer.
pub fn captured_replay() -> (StdoutReplay, Arc<Mutex<Vec<u8>>>) {
  let sink = Arc::new(Mutex::new(Vec::new()));
  (StdoutReplay::new(sink.clone()), sink)
}

/// Create `<packages_dir>/<name>` with a `package.json` and, if `pod` is
/// given, an `ios/<pod>.podspec` and a source file.
pub fn write_package(packages_dir: &Path, name: &str, pod: Option<&str>) -> PathBuf {
  let dir = packages_dir.join(name);
  std::fs::create_dir_all(&dir).unwrap();
  std::fs::write(
    dir.join("package.json"),
    format!(r#"{{ "name": "{}", "version": "1.2.3" }}"#, name),
  )
  .unwrap();

  if let Some(pod) = pod {
    let ios = dir.join("ios");
    std::fs::create_dir_all(&ios).unwrap();
    std::fs::write(ios.join(format!("{}.podspec", pod)), "Pod::Spec.new do |s| end\n").unwrap();
    std::fs::write(ios.join(format!("{}.m", pod)), "// source\n").unwrap();
  }

  dir
}
