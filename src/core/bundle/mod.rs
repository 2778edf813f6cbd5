pub mod config;
pub mod paths;
pub mod placeholder;
pub mod plist;

pub use config::{LaunchConfiguration, RuntimeSelector};
pub use paths::{safe_path_str, BundlePaths};
