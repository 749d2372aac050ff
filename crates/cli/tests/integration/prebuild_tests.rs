//! Tests for the `prebuild` command.

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn prebuild_produces_xcframework_and_cleans_up() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild", "expo-foo"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Prebuilt"))
    .stdout(predicate::str::contains("Finished in:"));

  let ios = env.ios_path("expo-foo");
  let artifact = ios.join("EXFoo.xcframework");
  assert!(artifact.join("slice-1/EXFoo.framework/EXFoo").exists());
  assert!(artifact.join("slice-2/EXFoo.framework/EXFoo").exists());
  assert!(!ios.join("EXFoo.xcodeproj").exists());
  assert!(!ios.join("EXFoo.spec.json").exists());
  assert!(env.derived_data_path().join("Build/Products").exists());

  let invocations = env.xcodebuild_invocations();
  assert_eq!(invocations.len(), 3);
  assert!(invocations[0].starts_with("-quiet build"));
}

#[test]
fn prebuild_alias_and_verbose_flag() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild-packages", "--verbose"])
    .assert()
    .success();

  let invocations = env.xcodebuild_invocations();
  assert!(invocations[0].starts_with("build -project EXFoo.xcodeproj"));
}

#[test]
fn unknown_package_names_are_ignored() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild", "expo-unknown"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No packages to prebuild"));

  assert!(env.xcodebuild_invocations().is_empty());
}

#[test]
fn generate_specs_keeps_project() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild", "-g"])
    .assert()
    .success();

  let ios = env.ios_path("expo-foo");
  assert!(ios.join("EXFoo.xcodeproj").exists());
  assert!(ios.join("EXFoo.spec.json").exists());
  assert!(!ios.join("EXFoo.xcframework").exists());
  assert!(env.xcodebuild_invocations().is_empty());
}

#[test]
fn remove_artifacts_flag() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");
  let artifact = env.ios_path("expo-foo").join("EXFoo.xcframework");
  std::fs::create_dir_all(&artifact).unwrap();

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild", "--remove-artifacts"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removing existing artifacts"));

  assert!(!artifact.exists());
}

#[test]
fn clean_cache_flag() {
  let env = TestEnv::new();
  std::fs::create_dir_all(env.derived_data_path().join("Build/Products")).unwrap();

  env
    .prebuilder_cmd(&[])
    .args(["prebuild", "-c"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Cleaning shared derived data directory"));

  assert!(!env.derived_data_path().exists());

  // Nothing left to clean.
  env.prebuilder_cmd(&[]).args(["prebuild", "-c"]).assert().success();
}

#[test]
fn failed_build_prints_tool_stdout_and_fails() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");
  env.write_tool(
    "xcodebuild",
    "#!/bin/sh\necho 'error: Undefined symbols for architecture arm64'\nexit 65\n",
  );

  env
    .prebuilder_cmd(&["expo-foo"])
    .args(["prebuild", "expo-foo"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("error: Undefined symbols for architecture arm64").count(1))
    .stderr(predicate::str::contains("Prebuild failed"));
}

#[test]
fn relative_directories_resolve_against_working_directory() {
  let env = TestEnv::new();
  env.add_package("expo-foo", "EXFoo");

  env
    .prebuilder_cmd(&["expo-foo"])
    .current_dir(env.temp.path())
    .env("PREBUILDER_PACKAGES_DIR", "packages")
    .env("PREBUILDER_DERIVED_DATA", "tmp/DerivedData")
    .args(["prebuild", "expo-foo"])
    .assert()
    .success();

  let ios = env.ios_path("expo-foo");
  assert!(ios.join("EXFoo.xcframework/slice-1/EXFoo.framework/EXFoo").exists());
  assert!(!ios.join("packages").exists());
  assert!(env.derived_data_path().join("Build/Products").exists());
}
