//! Prebuild orchestration.
//!
//! For every resolved package the [`Prebuilder`] runs, strictly in sequence:
//!
//! 1. generate the Xcode project from the package's spec
//! 2. build one framework per [`Flavor`] and merge them into an `.xcframework`
//! 3. remove the project's temporary files (the shared cache stays)
//! 4. report the elapsed time
//!
//! Any failure aborts the whole run. Cleaning the cache and removing
//! artifacts bypass the per-package loop entirely.

mod types;

pub use types::*;

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::PrebuildConfig;
use crate::error::Result;
use crate::packages::{Package, PackageRegistry, PackagesDir};
use crate::process::StdoutReplay;
use crate::xcode::{DerivedData, Flavor, Xcodebuild, XcodebuildOptions, XcodeProject, artifacts};
use crate::xcodegen::{Xcodegen, project_spec_for_package};

/// Flavors every package is built for: device and simulator.
pub fn default_flavors() -> Vec<Flavor> {
  vec![
    Flavor::new("Release", "iphoneos", ["arm64"]),
    Flavor::new("Release", "iphonesimulator", ["arm64", "x86_64"]),
  ]
}

/// Keep the requested names that are prebuildable, in request order; all of
/// `known` when nothing is requested.
pub fn resolve_package_names(requested: &[String], known: &[String]) -> Vec<String> {
  if requested.is_empty() {
    return known.to_vec();
  }
  requested.iter().filter(|name| known.contains(name)).cloned().collect()
}

pub struct Prebuilder<R> {
  registry: R,
  xcodebuild: Xcodebuild,
  xcodegen: Xcodegen,
  flavors: Vec<Flavor>,
}

impl Prebuilder<PackagesDir> {
  /// Build a prebuilder from `config`, resolving its paths first.
  pub fn from_config(config: &PrebuildConfig) -> Result<Self> {
    let config = config.clone().resolve_paths()?;
    Ok(Self::new(
      PackagesDir::new(config.packages_dir, config.prebuildable),
      Xcodebuild::new(config.xcodebuild, DerivedData::new(config.derived_data_dir)),
      Xcodegen::new(config.xcodegen),
    ))
  }
}

impl<R: PackageRegistry> Prebuilder<R> {
  pub fn new(registry: R, xcodebuild: Xcodebuild, xcodegen: Xcodegen) -> Self {
    Self {
      registry,
      xcodebuild,
      xcodegen,
      flavors: default_flavors(),
    }
  }

  pub fn with_flavors(mut self, flavors: Vec<Flavor>) -> Self {
    self.flavors = flavors;
    self
  }

  /// Send the stdout of failed tool invocations to `replay`.
  pub fn with_stdout_replay(mut self, replay: StdoutReplay) -> Self {
    self.xcodebuild = self.xcodebuild.with_stdout_replay(replay.clone());
    self.xcodegen = self.xcodegen.with_stdout_replay(replay);
    self
  }

  pub fn registry(&self) -> &R {
    &self.registry
  }

  pub fn derived_data(&self) -> &DerivedData {
    self.xcodebuild.derived_data()
  }

  /// Resolve `requested` to packages. Names the registry does not know are
  /// dropped with a warning rather than failing the run; this leniency is
  /// intentional so one stale entry in the prebuildable list does not block
  /// every other package.
  pub fn resolve_packages(&self, requested: &[String]) -> Result<Vec<Package>> {
    let names = resolve_package_names(requested, &self.registry.prebuildable_package_names());
    let mut packages = Vec::with_capacity(names.len());
    for name in names {
      match self.registry.package_by_name(&name)? {
        Some(pkg) => packages.push(pkg),
        None => warn!(package = %name, "package not found, skipping"),
      }
    }
    Ok(packages)
  }

  /// Run the prebuild for `requested` package names in the given mode.
  pub async fn run(&self, requested: &[String], options: &PrebuildOptions) -> Result<PrebuildOutcome> {
    if options.mode == PrebuildMode::CleanCache {
      info!("cleaning shared derived data directory");
      self.clean_build_cache().await?;
      return Ok(PrebuildOutcome::CacheCleaned {
        path: self.derived_data().root().to_path_buf(),
      });
    }

    let packages = self.resolve_packages(requested)?;

    if options.mode == PrebuildMode::RemoveArtifacts {
      info!("removing existing artifacts");
      let paths = self.remove_artifacts(&packages).await?;
      return Ok(PrebuildOutcome::ArtifactsRemoved { paths });
    }

    let xcodebuild_options = XcodebuildOptions::quiet(!options.verbose);
    let specs_only = options.mode == PrebuildMode::SpecsOnly;
    let mut reports = Vec::with_capacity(packages.len());
    for pkg in &packages {
      reports.push(self.process_package(pkg, specs_only, &xcodebuild_options).await?);
    }

    Ok(PrebuildOutcome::Prebuilt { packages: reports })
  }

  async fn process_package(
    &self,
    pkg: &Package,
    specs_only: bool,
    options: &XcodebuildOptions,
  ) -> Result<PackageReport> {
    info!(package = %pkg.name, "prebuilding");
    let start = Instant::now();

    let project = self.generate_project(pkg).await?;

    let artifact = if specs_only {
      None
    } else {
      let artifact = self.build_frameworks_for_project(&project, options).await?;
      self.clean_temporary_files(&project).await?;
      Some(artifact)
    };

    let report = PackageReport {
      package: pkg.name.clone(),
      project: project.name().to_string(),
      artifact,
      elapsed: start.elapsed(),
    };
    info!(package = %pkg.name, elapsed = %report.elapsed_secs(), "finished");
    Ok(report)
  }

  /// Generate the package's Xcode project into `<package>/ios`.
  pub async fn generate_project(&self, pkg: &Package) -> Result<XcodeProject> {
    let spec = project_spec_for_package(pkg)?;
    XcodeProject::generate_from_spec(&pkg.ios_dir(), &spec, &self.xcodegen).await
  }

  /// Build the project's framework for every flavor and merge them into its
  /// `.xcframework`.
  pub async fn build_frameworks_for_project(
    &self,
    project: &XcodeProject,
    options: &XcodebuildOptions,
  ) -> Result<PathBuf> {
    let mut frameworks = Vec::with_capacity(self.flavors.len());
    for flavor in &self.flavors {
      let framework = self
        .xcodebuild
        .build_framework(project, project.name(), flavor, options)
        .await?;
      frameworks.push(framework);
    }
    self.xcodebuild.build_xcframework(project, frameworks, options).await
  }

  pub async fn remove_artifacts(&self, packages: &[Package]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for pkg in packages {
      match XcodeProject::for_package(pkg) {
        Some(project) => removed.push(artifacts::remove_xcframework(&project).await?),
        None => warn!(package = %pkg.name, "package has no podspec, nothing to remove"),
      }
    }
    Ok(removed)
  }

  pub async fn clean_build_cache(&self) -> Result<()> {
    artifacts::clean_build_cache(self.derived_data()).await
  }

  pub async fn clean_temporary_files(&self, project: &XcodeProject) -> Result<()> {
    artifacts::clean_temporary_files(project, self.derived_data()).await
  }

  /// Prebuild a single package if it can be prebuilt, quietly unless
  /// `options` say otherwise. Returns `None` for skipped packages.
  pub async fn prebuild_package(&self, pkg: &Package, options: &XcodebuildOptions) -> Result<Option<PackageReport>> {
    if !self.registry.can_prebuild_package(pkg) {
      return Ok(None);
    }
    self.process_package(pkg, false, options).await.map(Some)
  }

  /// Release pipeline step: prebuild each of `packages` that can be prebuilt.
  pub async fn prebuild_for_release(&self, packages: &[Package]) -> Result<Vec<PackageReport>> {
    let options = XcodebuildOptions::quiet(true);
    let mut reports = Vec::new();
    for pkg in packages {
      if let Some(report) = self.prebuild_package(pkg, &options).await? {
        reports.push(report);
      }
    }
    Ok(reports)
  }
}
