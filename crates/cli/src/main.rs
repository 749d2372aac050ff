mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use prebuilder_lib::config::{ENV_DERIVED_DATA, ENV_PACKAGES_DIR, PrebuildConfig};

use crate::output::OutputFormat;

/// prebuilder - Prebuilds iOS frameworks of monorepo packages into xcframeworks
#[derive(Parser)]
#[command(name = "prebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Directory containing the packages
  #[arg(long, global = true, env = ENV_PACKAGES_DIR)]
  packages_dir: Option<PathBuf>,

  /// Shared derived data directory used by xcodebuild
  #[arg(long, global = true, env = ENV_DERIVED_DATA)]
  derived_data: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Prebuild `.xcframework` artifacts for the given packages (all prebuildable packages if none given)
  #[command(visible_alias = "prebuild-packages")]
  Prebuild {
    /// Names of the packages to prebuild
    packages: Vec<String>,

    /// Removes `.xcframework` artifacts for given packages
    #[arg(short, long)]
    remove_artifacts: bool,

    /// Cleans the shared derived data folder
    #[arg(short, long)]
    clean_cache: bool,

    /// Only generates project specs
    #[arg(short, long)]
    generate_specs: bool,

    /// Outputs `xcodebuild` logs
    #[arg(short, long)]
    verbose: bool,
  },

  /// Show the resolved configuration
  Info {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let verbose = matches!(cli.command, Commands::Prebuild { verbose: true, .. });
  init_tracing(verbose);

  let mut config = PrebuildConfig::from_env();
  if let Some(dir) = cli.packages_dir {
    config.packages_dir = dir;
  }
  if let Some(dir) = cli.derived_data {
    config.derived_data_dir = dir;
  }
  debug!(?config, "resolved configuration");

  match cli.command {
    Commands::Prebuild {
      packages,
      remove_artifacts,
      clean_cache,
      generate_specs,
      verbose,
    } => cmd::cmd_prebuild(
      &config,
      &packages,
      cmd::PrebuildFlags {
        remove_artifacts,
        clean_cache,
        generate_specs,
        verbose,
      },
    ),
    Commands::Info { output } => cmd::cmd_info(&config, output),
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
