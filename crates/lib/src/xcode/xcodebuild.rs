//! Invocation of `xcodebuild`.
//!
//! [`Xcodebuild`] assembles argument lists and runs the tool from the
//! project's root directory, sharing one derived data directory across all
//! builds.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::consts::{FRAMEWORK_EXTRANEOUS_ITEMS, IOS_SCHEME_SUFFIX};
use crate::error::{PrebuildError, Result};
use crate::process::{StdoutReplay, run_tool};
use crate::util::fs::remove_path;
use crate::xcode::{DerivedData, Flavor, Framework, StdOutput, XcodeProject, XcodebuildOptions};

#[derive(Debug, Clone)]
pub struct Xcodebuild {
  program: PathBuf,
  derived_data: DerivedData,
  replay: StdoutReplay,
}

impl Xcodebuild {
  pub fn new(program: impl Into<PathBuf>, derived_data: DerivedData) -> Self {
    Self {
      program: program.into(),
      derived_data,
      replay: StdoutReplay::default(),
    }
  }

  /// Send the stdout of failed invocations to `replay` instead of our stdout.
  pub fn with_stdout_replay(mut self, replay: StdoutReplay) -> Self {
    self.replay = replay;
    self
  }

  pub fn derived_data(&self) -> &DerivedData {
    &self.derived_data
  }

  /// Build the `.framework` of `target` for one flavor.
  ///
  /// The framework is picked from the shared products directory, its binary
  /// size is recorded, and `Headers` and `_CodeSignature` are stripped.
  pub async fn build_framework(
    &self,
    project: &XcodeProject,
    target: &str,
    flavor: &Flavor,
    options: &XcodebuildOptions,
  ) -> Result<Framework> {
    info!(target, flavor = %flavor, "building framework");

    let mut args = vec![
      "build".to_string(),
      "-project".to_string(),
      project.xcodeproj_file_name(),
      "-scheme".to_string(),
      format!("{}{}", target, IOS_SCHEME_SUFFIX),
      "-configuration".to_string(),
      flavor.configuration.clone(),
      "-sdk".to_string(),
      flavor.sdk.clone(),
    ];
    args.extend(spread_args("-arch", &flavor.archs));
    args.push("-derivedDataPath".to_string());
    args.push(self.derived_data.root().to_string_lossy().into_owned());

    self.run(project.root_dir(), args, options).await?;

    let framework_path = self.derived_data.framework_path(target, flavor);
    let binary_path = framework_path.join(target);
    let binary_size = match fs::symlink_metadata(&binary_path).await {
      Ok(metadata) => metadata.len(),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(PrebuildError::NotFound { path: binary_path });
      }
      Err(e) => return Err(e.into()),
    };

    for item in FRAMEWORK_EXTRANEOUS_ITEMS {
      let path = framework_path.join(item);
      if let Err(e) = remove_path(&path).await {
        debug!(path = %path.display(), error = %e, "failed to strip framework item");
      }
    }

    Ok(Framework {
      target: target.to_string(),
      flavor: flavor.clone(),
      framework_path,
      binary_size,
    })
  }

  /// Merge `frameworks` into the project's `.xcframework`, replacing any
  /// previous artifact, and return its path.
  pub async fn build_xcframework(
    &self,
    project: &XcodeProject,
    frameworks: Vec<Framework>,
    options: &XcodebuildOptions,
  ) -> Result<PathBuf> {
    let output_path = project.xcframework_path();
    remove_path(&output_path).await?;

    info!(output = %output_path.display(), count = frameworks.len(), "creating xcframework");

    let framework_paths: Vec<String> = frameworks
      .into_iter()
      .map(|framework| framework.framework_path.to_string_lossy().into_owned())
      .collect();

    let mut args = vec!["-create-xcframework".to_string()];
    args.extend(spread_args("-framework", &framework_paths));
    args.push("-output".to_string());
    args.push(output_path.to_string_lossy().into_owned());

    // -create-xcframework accepts neither settings nor -quiet.
    let merge_options = XcodebuildOptions {
      std_output: Some(if options.quiet {
        StdOutput::Ignore
      } else {
        StdOutput::Stdout
      }),
      ..Default::default()
    };
    self.run(project.root_dir(), args, &merge_options).await?;

    Ok(output_path)
  }

  /// Run xcodebuild in `cwd` with `args` plus the flags derived from `options`.
  pub async fn run(&self, cwd: &Path, args: Vec<String>, options: &XcodebuildOptions) -> Result<()> {
    let final_args = xcodebuild_args(args, options);
    run_tool(
      &self.program,
      &final_args,
      cwd,
      options.std_output.unwrap_or_default(),
      &self.replay,
    )
    .await
  }
}

/// Prepend `KEY=VALUE` settings and `-quiet` to `args`, in that order.
pub fn xcodebuild_args(args: Vec<String>, options: &XcodebuildOptions) -> Vec<String> {
  let mut final_args: Vec<String> = options
    .settings
    .iter()
    .map(|(key, value)| format!("{}={}", key, value))
    .collect();

  if options.quiet {
    final_args.push("-quiet".to_string());
  }
  final_args.extend(args);
  final_args
}

/// Repeat `flag` before every value: `-arch a -arch b`.
pub fn spread_args<S: AsRef<str>>(flag: &str, values: &[S]) -> Vec<String> {
  values
    .iter()
    .flat_map(|value| [flag.to_string(), value.as_ref().to_string()])
    .collect()
}
