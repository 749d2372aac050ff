//! xcodegen project spec.
//!
//! Only the subset of the xcodegen spec format needed to describe a single
//! framework target is modelled here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{BUNDLE_IDENTIFIER_PREFIX, DEFAULT_DEPLOYMENT_TARGET, DEFAULT_SWIFT_VERSION, SPEC_FILE_SUFFIX};
use crate::error::{PrebuildError, Result};
use crate::packages::Package;
use crate::xcode::SettingValue;

pub const MINIMUM_XCODEGEN_VERSION: &str = "2.18.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
  pub name: String,
  pub options: SpecOptions,
  pub targets: BTreeMap<String, TargetSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecOptions {
  pub minimum_xcode_gen_version: String,
  pub deployment_target: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
  #[serde(rename = "type")]
  pub kind: String,
  pub platform: Vec<String>,
  pub sources: Vec<SourceSpec>,
  pub settings: TargetSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
  pub path: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub excludes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetSettings {
  pub base: BTreeMap<String, SettingValue>,
}

/// Build the spec of the framework project for `pkg`'s pod.
///
/// The spec is written next to the sources in `<package>/ios`, so source
/// paths are relative to that directory.
pub fn project_spec_for_package(pkg: &Package) -> Result<ProjectSpec> {
  let pod_name = pkg.pod_name.clone().ok_or_else(|| PrebuildError::InvalidPackage {
    name: pkg.name.clone(),
    message: "no podspec found in ios directory".to_string(),
  })?;

  let mut base = BTreeMap::new();
  base.insert("PRODUCT_NAME".to_string(), SettingValue::from(pod_name.as_str()));
  base.insert(
    "PRODUCT_BUNDLE_IDENTIFIER".to_string(),
    SettingValue::from(format!("{}.{}", BUNDLE_IDENTIFIER_PREFIX, pod_name)),
  );
  base.insert("BUILD_LIBRARY_FOR_DISTRIBUTION".to_string(), SettingValue::from(true));
  base.insert("GENERATE_INFOPLIST_FILE".to_string(), SettingValue::from(true));
  base.insert("SWIFT_VERSION".to_string(), SettingValue::from(DEFAULT_SWIFT_VERSION));
  base.insert(
    "IPHONEOS_DEPLOYMENT_TARGET".to_string(),
    SettingValue::from(DEFAULT_DEPLOYMENT_TARGET),
  );

  let target = TargetSpec {
    kind: "framework".to_string(),
    platform: vec!["iOS".to_string()],
    sources: vec![SourceSpec {
      path: ".".to_string(),
      excludes: vec![
        "**/*.xcodeproj".to_string(),
        "**/*.xcframework".to_string(),
        format!("**/*.{}", SPEC_FILE_SUFFIX),
        "**/*.podspec".to_string(),
        "Tests/**".to_string(),
      ],
    }],
    settings: TargetSettings { base },
  };

  Ok(ProjectSpec {
    name: pod_name.clone(),
    options: SpecOptions {
      minimum_xcode_gen_version: MINIMUM_XCODEGEN_VERSION.to_string(),
      deployment_target: BTreeMap::from([("iOS".to_string(), DEFAULT_DEPLOYMENT_TARGET.to_string())]),
    },
    targets: BTreeMap::from([(pod_name, target)]),
  })
}
