//! Naming conventions shared with the external Apple build tools.

/// Name of the application; used as the namespace under the system temp dir.
pub const APP_NAME: &str = "prebuilder";

/// Extension of the project descriptor generated by xcodegen.
pub const XCODEPROJ_EXT: &str = "xcodeproj";

/// Extension of a single-platform build product.
pub const FRAMEWORK_EXT: &str = "framework";

/// Extension of the universal multi-platform artifact.
pub const XCFRAMEWORK_EXT: &str = "xcframework";

/// Suffix of the spec file written next to the generated project.
pub const SPEC_FILE_SUFFIX: &str = "spec.json";

/// xcodegen names platform-specific schemes `<target>_<platform>`.
pub const IOS_SCHEME_SUFFIX: &str = "_iOS";

/// Sub-items stripped from every built framework. Headers are shipped with the
/// package sources and the code signature is only produced for the simulator.
pub const FRAMEWORK_EXTRANEOUS_ITEMS: &[&str] = &["Headers", "_CodeSignature"];

/// Packages that are prebuilt unless the configuration says otherwise.
pub const DEFAULT_PREBUILDABLE_PACKAGES: &[&str] = &[
  "expo-application",
  "expo-constants",
  "expo-device",
  "expo-image-loader",
  "expo-structured-headers",
];

pub const DEFAULT_DEPLOYMENT_TARGET: &str = "12.0";
pub const DEFAULT_SWIFT_VERSION: &str = "5.0";
pub const BUNDLE_IDENTIFIER_PREFIX: &str = "dev.prebuilder";
