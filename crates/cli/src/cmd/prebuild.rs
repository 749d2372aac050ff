//! Implementation of the `prebuilder prebuild` command.
//!
//! Generates Xcode projects for the requested packages, builds them for every
//! flavor and merges the frameworks into one `.xcframework` per package.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use prebuilder_lib::config::PrebuildConfig;
use prebuilder_lib::prebuild::{PrebuildMode, PrebuildOptions, PrebuildOutcome, Prebuilder};

use crate::output::{print_info, print_stat, print_success};

/// Flags of the prebuild command, in the order they take precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrebuildFlags {
  pub clean_cache: bool,
  pub remove_artifacts: bool,
  pub generate_specs: bool,
  pub verbose: bool,
}

/// Execute the prebuild command.
///
/// Packages that are not prebuildable are ignored. Any build failure aborts
/// the command.
pub fn cmd_prebuild(config: &PrebuildConfig, packages: &[String], flags: PrebuildFlags) -> Result<()> {
  let options = PrebuildOptions {
    mode: PrebuildMode::from_flags(flags.remove_artifacts, flags.clean_cache, flags.generate_specs),
    verbose: flags.verbose,
  };

  match options.mode {
    PrebuildMode::CleanCache => print_info("Cleaning shared derived data directory"),
    PrebuildMode::RemoveArtifacts => print_info("Removing existing artifacts"),
    PrebuildMode::Build | PrebuildMode::SpecsOnly => {}
  }

  let prebuilder = Prebuilder::from_config(config).context("Failed to resolve configured paths")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let outcome = rt
    .block_on(prebuilder.run(packages, &options))
    .context("Prebuild failed")?;

  match outcome {
    PrebuildOutcome::CacheCleaned { path } => {
      print_success(&format!("Removed {}", path.display()));
    }
    PrebuildOutcome::ArtifactsRemoved { paths } => {
      for path in &paths {
        print_stat("Removed", &path.display().to_string());
      }
      print_success(&format!("Removed artifacts of {} package(s)", paths.len()));
    }
    PrebuildOutcome::Prebuilt { packages } => {
      if packages.is_empty() {
        print_info("No packages to prebuild");
      }
      for report in &packages {
        println!();
        print_info(&format!("Prebuilt {}", report.package.green()));
        if let Some(artifact) = &report.artifact {
          print_stat("Artifact", &artifact.display().to_string());
        }
        print_success(&format!("Finished in: {}", report.elapsed_secs().magenta()));
      }
    }
  }

  Ok(())
}
