use crate::consts::APP_NAME;
use std::path::PathBuf;

/// Returns the namespaced directory under the system temp dir
pub fn temp_namespace_dir() -> PathBuf {
  std::env::temp_dir().join(APP_NAME)
}

/// Returns the default location of the shared xcodebuild derived data directory
pub fn shared_derived_data_dir() -> PathBuf {
  temp_namespace_dir().join("DerivedData")
}
