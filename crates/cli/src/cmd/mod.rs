mod info;
mod prebuild;

pub use info::cmd_info;
pub use prebuild::{PrebuildFlags, cmd_prebuild};
