use anyhow::Result;

use prebuilder_lib::config::PrebuildConfig;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_info(config: &PrebuildConfig, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(config);
  }

  println!("Configuration:");
  print_stat("Packages", &config.packages_dir.display().to_string());
  print_stat("Derived data", &config.derived_data_dir.display().to_string());
  print_stat("xcodebuild", &config.xcodebuild.display().to_string());
  print_stat("xcodegen", &config.xcodegen.display().to_string());
  print_stat("Prebuildable", &config.prebuildable.join(", "));
  Ok(())
}
