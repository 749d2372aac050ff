//! Values passed to and returned from xcodebuild invocations.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One build variant: configuration, SDK and the architectures to compile for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flavor {
  pub configuration: String,
  pub sdk: String,
  pub archs: Vec<String>,
}

impl Flavor {
  pub fn new<I, S>(configuration: &str, sdk: &str, archs: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      configuration: configuration.to_string(),
      sdk: sdk.to_string(),
      archs: archs.into_iter().map(Into::into).collect(),
    }
  }

  /// Name of the products sub-directory xcodebuild uses for this flavor,
  /// e.g. `Release-iphonesimulator`.
  pub fn products_dir_name(&self) -> String {
    format!("{}-{}", self.configuration, self.sdk)
  }
}

impl fmt::Display for Flavor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.products_dir_name(), self.archs.join(", "))
  }
}

/// A `.framework` produced by a successful build of one flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
  pub target: String,
  pub flavor: Flavor,
  pub framework_path: PathBuf,
  /// Size in bytes of the framework's binary.
  pub binary_size: u64,
}

/// Value of an xcodebuild build setting override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
  Bool(bool),
  String(String),
}

impl fmt::Display for SettingValue {
  /// Booleans use Xcode's `YES`/`NO` convention, strings pass through.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SettingValue::Bool(true) => f.write_str("YES"),
      SettingValue::Bool(false) => f.write_str("NO"),
      SettingValue::String(value) => f.write_str(value),
    }
  }
}

impl From<bool> for SettingValue {
  fn from(value: bool) -> Self {
    SettingValue::Bool(value)
  }
}

impl From<&str> for SettingValue {
  fn from(value: &str) -> Self {
    SettingValue::String(value.to_string())
  }
}

impl From<String> for SettingValue {
  fn from(value: String) -> Self {
    SettingValue::String(value)
  }
}

/// Where the standard output of a spawned tool goes while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdOutput {
  /// Forwarded to our stderr so it ends up next to the tool's own diagnostics.
  #[default]
  Stderr,
  /// Forwarded to our stdout.
  Stdout,
  /// Discarded (still kept for replay on failure).
  Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct XcodebuildOptions {
  /// Pass `-quiet` to xcodebuild.
  pub quiet: bool,

  /// Build setting overrides, passed as `KEY=VALUE`.
  pub settings: BTreeMap<String, SettingValue>,

  /// Destination of the tool's stdout; [`StdOutput::Stderr`] when unset.
  pub std_output: Option<StdOutput>,
}

impl XcodebuildOptions {
  pub fn quiet(quiet: bool) -> Self {
    Self {
      quiet,
      ..Default::default()
    }
  }

  pub fn with_setting(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
    self.settings.insert(key.to_string(), value.into());
    self
  }
}
